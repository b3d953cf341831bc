//! Toontown Rewritten holders: invasions, population and silly meter.
//!
//! Each holder fetches its endpoint on construction and again on
//! [`refresh`](Invasions::refresh). Upstream asks clients to poll no more
//! than once every 5-15 minutes; nothing here enforces that.

pub mod invasions;
pub mod population;
pub mod sillymeter;

pub use invasions::Invasions;
pub use population::Population;
pub use sillymeter::SillyMeter;
