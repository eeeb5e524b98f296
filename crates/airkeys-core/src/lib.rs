pub mod hand;
pub mod instrument;
pub mod motion;
pub mod playback;
pub mod scale;
pub mod session;
pub mod voice;

pub use hand::*;
pub use instrument::*;
pub use motion::*;
pub use playback::*;
pub use scale::*;
pub use session::*;
pub use voice::*;
