//! Domain layer: routing table, upstream identity, and currency catalog.
//!
//! Everything here is immutable after startup. The gateway holds no state
//! that outlives a single inbound request, so the domain layer is pure
//! data plus lookup logic.

pub mod currency;
pub mod route_table;
pub mod upstream;

pub use route_table::{PathRewrite, Route, RouteMatch, RouteTable, RouteTableError};
pub use upstream::UpstreamService;
