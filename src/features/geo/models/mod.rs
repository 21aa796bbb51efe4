mod district;
mod locality;
mod province;

pub use district::District;
pub use locality::{Locality, LocalityKind};
pub use province::Province;
