//! # bmp_info
//!
//! Decodes the file header and DIB header of Microsoft *bmp* files.
//!
//! Pixel data and color tables are not touched. The decoder reads the 14 byte
//! file header, then the DIB header right after it, and hands back both as
//! typed records.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::fs::File;
//!
//! fn main() -> bmp_info::Result<()> {
//!     let file = File::open( "image.bmp" )?;
//!     let ( file_header, dib_header ) = bmp_info::decode( file )?;
//!
//!     println!( "{} x {}", dib_header.pixel_width(), dib_header.pixel_height() );
//!     println!( "pixels start at {}", file_header.pixels_offset );
//!     Ok( () )
//! }
//! ```
//!
//! Only the fields common to each header variant are read. Extended headers
//! (sizes 52 to 124, and the 64 byte OS/2 header) leave
//! [`DibHeader::trailing_len`] bytes unread in the source.
use std::io::{
    Read,
    Seek,
};

use log::debug;

pub mod cursor;
pub mod error;
pub mod header;
pub mod render;

pub use crate::cursor::ByteCursor;
pub use crate::error::{
    Error,
    Result,
};
pub use crate::header::{
    read_dib_header,
    read_file_header,
    BitmapFileHeader,
    CoreHeader,
    DibHeader,
    InfoHeader,
};

/// Options for [`decode_with`].
#[derive( Debug, Clone, Copy, Default, PartialEq, Eq )]
pub struct DecodeOptions {
    /// Reject files whose identifier is not "BM".
    pub check_signature: bool,
}

impl DecodeOptions {
    pub fn new() -> DecodeOptions {
        DecodeOptions::default()
    }

    pub fn check_signature( mut self, check: bool ) -> DecodeOptions {
        self.check_signature = check;
        self
    }
}

/// Reads both headers from the start of `input` with default options.
pub fn decode<R: Read + Seek>( input: R ) -> Result<( BitmapFileHeader, DibHeader )> {
    decode_with( input, &DecodeOptions::default() )
}

pub fn decode_with<R: Read + Seek>( input: R, options: &DecodeOptions )
    -> Result<( BitmapFileHeader, DibHeader )> {

    let mut cursor = ByteCursor::new( input )?;
    decode_cursor( &mut cursor, options )
}

/// Reads both headers starting at the cursor's current position, leaving the
/// cursor right after the last DIB field read.
pub fn decode_cursor<R: Read + Seek>( cursor: &mut ByteCursor<R>, options: &DecodeOptions )
    -> Result<( BitmapFileHeader, DibHeader )> {

    debug!( "decoding headers from a {} byte source", cursor.len() );

    let file_header = read_file_header( cursor )?;
    if options.check_signature && !file_header.has_bm_signature() {
        return Err( Error::InvalidSignature( file_header.file_identifier ) );
    }

    let dib_header = read_dib_header( cursor )?;

    Ok( ( file_header, dib_header ) )
}
