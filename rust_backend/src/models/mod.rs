//! Value types shared by the computation core, the gateways and the services.

pub mod location;
pub mod results;
pub mod series;
pub mod threshold;
pub mod time;
pub mod variable;

pub use location::*;
pub use results::*;
pub use series::*;
pub use threshold::*;
pub use time::*;
pub use variable::*;
