// light/ - Illumination model
//
// Pure functions mapping distance-to-emitter and depth into
// brightness, dot size and colour. No state, no allocation.

mod ramp;
mod shade;

pub use ramp::*;
pub use shade::*;
