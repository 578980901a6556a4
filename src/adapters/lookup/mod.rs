//! Course lookup adapters. Implement CourseLookupPort.
//!
//! Provides the HTTP lookup and a mock lookup for offline use and testing.

pub mod http_lookup;
pub mod mock_lookup;

pub use http_lookup::HttpCourseLookup;
pub use mock_lookup::MockCourseLookup;
