//! Internal domain modules for the Sketchnotes core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod drawing_name;
pub mod drawing_store;
pub mod error;
pub mod note;
pub mod note_store;
pub mod pen;
pub mod pixel_buffer;
pub mod session;

#[doc(inline)]
pub use drawing_store::{DrawingEntry, DrawingStore};
#[doc(inline)]
pub use error::{Result, SketchnotesError};
#[doc(inline)]
pub use note::Note;
#[doc(inline)]
pub use note_store::NoteStore;
#[doc(inline)]
pub use pen::PenSettings;
#[doc(inline)]
pub use pixel_buffer::PixelBuffer;
#[doc(inline)]
pub use session::{Session, SessionView};
