mod assemble;
mod constants;
mod decode;
mod io;
pub mod layout;
mod options;
pub mod render;
mod selection;
mod types;

pub use assemble::{ImageDocument, Page, build};
pub use constants::{POINTS_PER_MM, mm_to_pt};
pub use decode::{DecodedImage, ImageFile, SelectedFile, decode_image};
pub use io::{generate_pdf, save_pdf};
pub use layout::{PlacedImage, fit_to_page};
pub use options::*;
pub use render::{PageRenderer, PdfRenderer};
pub use selection::{FileId, Selection};
pub use types::*;
