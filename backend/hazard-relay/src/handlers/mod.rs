pub mod flood;
pub mod proxy;

pub use flood::flood;
pub use proxy::{tsunami, weather, wildfire, WildfireQuery};
