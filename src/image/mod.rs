pub mod io;
pub mod rgba;
pub mod traits;

pub use self::rgba::ImageRgba8;
pub use self::traits::ImageView;
