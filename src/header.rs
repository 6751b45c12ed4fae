//! # header
//!
//! Decoders for the bitmap file header and the DIB header that follows it.
//!
//! The DIB header has been extended several times since the first OS/2 and
//! Windows versions. Every extension is told apart only by the size field at
//! its front, so the size is read first and checked against the known sizes
//! before anything else is trusted.
use std::io::{
    Read,
    Seek,
};

use log::{
    debug,
    trace,
};

use crate::cursor::ByteCursor;
use crate::error::{
    Error,
    Result,
};

/// Size of the bitmap file header on the wire.
pub const FILE_HEADER_SIZE: u64 = 14;

/// "BM" read as a little-endian u16.
pub const BM_SIGNATURE: u16 = 0x4D42;

const CORE_HEADER_SIZE: u32 = 12;
const OS2_HEADER_SIZE: u32 = 64;
const INFO_HEADER_SIZE: u32 = 40;
const V2_INFO_HEADER_SIZE: u32 = 52;
const V3_INFO_HEADER_SIZE: u32 = 56;
const V4_HEADER_SIZE: u32 = 108;
const V5_HEADER_SIZE: u32 = 124;

// Field bytes each variant reads after the size field.
const CORE_FIELDS_LEN: u32 = 8;
const INFO_FIELDS_LEN: u32 = 36;

#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub struct BitmapFileHeader {
    pub file_identifier: u16,
    pub file_size: u32,
    pub reserved_a: u16,
    pub reserved_b: u16,
    pub pixels_offset: u32,
}

impl BitmapFileHeader {
    pub fn from_cursor<R: Read + Seek>( cursor: &mut ByteCursor<R> ) -> Result<BitmapFileHeader> {
        let file_identifier = cursor.read_u16()?;
        let file_size = cursor.read_u32()?;
        let reserved_a = cursor.read_u16()?;
        let reserved_b = cursor.read_u16()?;
        let pixels_offset = cursor.read_u32()?;

        trace!( "file header: id 0x{:04X}, size {}, pixels at {}",
            file_identifier, file_size, pixels_offset );

        Ok( BitmapFileHeader {
            file_identifier,
            file_size,
            reserved_a,
            reserved_b,
            pixels_offset,
        } )
    }

    pub fn has_bm_signature( &self ) -> bool {
        self.file_identifier == BM_SIGNATURE
    }

    /// Field names and values in wire order.
    pub fn fields( &self ) -> [( &'static str, i64 ); 5] {
        [
            ( "file_identifier", self.file_identifier as i64 ),
            ( "file_size", self.file_size as i64 ),
            ( "reserved_a", self.reserved_a as i64 ),
            ( "reserved_b", self.reserved_b as i64 ),
            ( "pixels_offset", self.pixels_offset as i64 ),
        ]
    }
}

/// The legacy header shape, used for sizes 12 and 64.
#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub struct CoreHeader {
    pub struct_size: u32,
    pub pixel_width: i32,
    pub pixel_height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
}

/// The 40 byte prefix shared by every info header extension.
#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub struct InfoHeader {
    pub struct_size: u32,
    pub pixel_width: i32,
    pub pixel_height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub size_in_bytes: u32,
    pub horizontal_resolution_pixels_per_meter: i32,
    pub vertical_resolution_pixels_per_meter: i32,
    pub number_of_color_indexes: u32,
    pub number_of_required_color_indexes: u32,
}

#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub enum DibHeader {
    Core( CoreHeader ),
    Info( InfoHeader ),
}

#[derive( Debug, PartialEq, Eq, Clone, Copy )]
enum Variant {
    Core,
    Info,
}

impl Variant {
    fn from_size( size: u32 ) -> Result<Variant> {
        match size {
            CORE_HEADER_SIZE | OS2_HEADER_SIZE => Ok( Variant::Core ),
            INFO_HEADER_SIZE
            | V2_INFO_HEADER_SIZE
            | V3_INFO_HEADER_SIZE
            | V4_HEADER_SIZE
            | V5_HEADER_SIZE => Ok( Variant::Info ),
            _ => Err( Error::InvalidHeaderSize( size ) ),
        }
    }
}

impl CoreHeader {
    fn from_cursor<R: Read + Seek>( cursor: &mut ByteCursor<R>, struct_size: u32 ) -> Result<CoreHeader> {
        let pixel_width = cursor.read_u16()? as i32;
        let pixel_height = cursor.read_u16()? as i32;
        let planes = cursor.read_u16()?;
        let bits_per_pixel = cursor.read_u16()?;

        trace!( "core header: {}x{}, {} planes, {} bpp",
            pixel_width, pixel_height, planes, bits_per_pixel );

        Ok( CoreHeader {
            struct_size,
            pixel_width,
            pixel_height,
            planes,
            bits_per_pixel,
        } )
    }
}

impl InfoHeader {
    fn from_cursor<R: Read + Seek>( cursor: &mut ByteCursor<R>, struct_size: u32 ) -> Result<InfoHeader> {
        let pixel_width = cursor.read_i32()?;
        let pixel_height = cursor.read_i32()?;
        let planes = cursor.read_u16()?;
        let bits_per_pixel = cursor.read_u16()?;
        let compression = cursor.read_u32()?;
        let size_in_bytes = cursor.read_u32()?;
        let horizontal_resolution_pixels_per_meter = cursor.read_i32()?;
        let vertical_resolution_pixels_per_meter = cursor.read_i32()?;
        let number_of_color_indexes = cursor.read_u32()?;
        let number_of_required_color_indexes = cursor.read_u32()?;

        trace!( "info header: {}x{}, {} planes, {} bpp, compression {}",
            pixel_width, pixel_height, planes, bits_per_pixel, compression );

        let header = InfoHeader {
            struct_size,
            pixel_width,
            pixel_height,
            planes,
            bits_per_pixel,
            compression,
            size_in_bytes,
            horizontal_resolution_pixels_per_meter,
            vertical_resolution_pixels_per_meter,
            number_of_color_indexes,
            number_of_required_color_indexes,
        };

        header.validate()?;

        Ok( header )
    }

    fn validate( &self ) -> Result<()> {
        if self.planes != 1 {
            return Err( Error::InvalidPlaneCount( self.planes ) );
        }

        match self.bits_per_pixel {
            1 | 4 | 8 | 16 | 24 | 32 => {},
            x => return Err( Error::InvalidBitsPerPixel( x ) ),
        }

        match self.compression {
            0 => Ok( () ),
            x => Err( Error::UnsupportedCompression( x ) ),
        }
    }
}

impl DibHeader {
    /// Reads the size field, then the variant it names.
    ///
    /// Only the fields shared by all sizes of a variant are read. Extension
    /// bytes past them (color masks, color space, profile data) stay in the
    /// source; see `trailing_len`.
    pub fn from_cursor<R: Read + Seek>( cursor: &mut ByteCursor<R> ) -> Result<DibHeader> {
        let struct_size = cursor.read_u32()?;
        let variant = Variant::from_size( struct_size )?;

        debug!( "DIB header size {} selects the {:?} variant", struct_size, variant );

        let header = match variant {
            Variant::Core => DibHeader::Core( CoreHeader::from_cursor( cursor, struct_size )? ),
            Variant::Info => DibHeader::Info( InfoHeader::from_cursor( cursor, struct_size )? ),
        };

        if header.trailing_len() > 0 {
            debug!( "{} bytes of the {} byte DIB header left unread",
                header.trailing_len(), struct_size );
        }

        Ok( header )
    }

    pub fn is_core( &self ) -> bool {
        match *self {
            DibHeader::Core( _ ) => true,
            DibHeader::Info( _ ) => false,
        }
    }

    pub fn struct_size( &self ) -> u32 {
        match *self {
            DibHeader::Core( ref h ) => h.struct_size,
            DibHeader::Info( ref h ) => h.struct_size,
        }
    }

    pub fn pixel_width( &self ) -> i32 {
        match *self {
            DibHeader::Core( ref h ) => h.pixel_width,
            DibHeader::Info( ref h ) => h.pixel_width,
        }
    }

    pub fn pixel_height( &self ) -> i32 {
        match *self {
            DibHeader::Core( ref h ) => h.pixel_height,
            DibHeader::Info( ref h ) => h.pixel_height,
        }
    }

    pub fn planes( &self ) -> u16 {
        match *self {
            DibHeader::Core( ref h ) => h.planes,
            DibHeader::Info( ref h ) => h.planes,
        }
    }

    pub fn bits_per_pixel( &self ) -> u16 {
        match *self {
            DibHeader::Core( ref h ) => h.bits_per_pixel,
            DibHeader::Info( ref h ) => h.bits_per_pixel,
        }
    }

    // The remaining accessors are zero for core headers.

    pub fn compression( &self ) -> u32 {
        self.info().map_or( 0, | h | h.compression )
    }

    pub fn size_in_bytes( &self ) -> u32 {
        self.info().map_or( 0, | h | h.size_in_bytes )
    }

    pub fn horizontal_resolution_pixels_per_meter( &self ) -> i32 {
        self.info().map_or( 0, | h | h.horizontal_resolution_pixels_per_meter )
    }

    pub fn vertical_resolution_pixels_per_meter( &self ) -> i32 {
        self.info().map_or( 0, | h | h.vertical_resolution_pixels_per_meter )
    }

    pub fn number_of_color_indexes( &self ) -> u32 {
        self.info().map_or( 0, | h | h.number_of_color_indexes )
    }

    pub fn number_of_required_color_indexes( &self ) -> u32 {
        self.info().map_or( 0, | h | h.number_of_required_color_indexes )
    }

    fn info( &self ) -> Option<&InfoHeader> {
        match *self {
            DibHeader::Info( ref h ) => Some( h ),
            DibHeader::Core( _ ) => None,
        }
    }

    /// Bytes consumed from the source, size field included.
    pub fn bytes_read( &self ) -> u32 {
        4 + match *self {
            DibHeader::Core( _ ) => CORE_FIELDS_LEN,
            DibHeader::Info( _ ) => INFO_FIELDS_LEN,
        }
    }

    /// Bytes of the declared header that were not read. Callers that go on to
    /// read the color table or pixels must skip these first.
    pub fn trailing_len( &self ) -> u32 {
        self.struct_size().saturating_sub( self.bytes_read() )
    }

    /// Field names and values in the fixed rendering order, absent fields as 0.
    pub fn fields( &self ) -> [( &'static str, i64 ); 11] {
        [
            ( "struct_size", self.struct_size() as i64 ),
            ( "pixel_width", self.pixel_width() as i64 ),
            ( "pixel_height", self.pixel_height() as i64 ),
            ( "planes", self.planes() as i64 ),
            ( "bits_per_pixel", self.bits_per_pixel() as i64 ),
            ( "compression", self.compression() as i64 ),
            ( "size_in_bytes", self.size_in_bytes() as i64 ),
            ( "horizontal_resolution_pixels_per_meter", self.horizontal_resolution_pixels_per_meter() as i64 ),
            ( "vertical_resolution_pixels_per_meter", self.vertical_resolution_pixels_per_meter() as i64 ),
            ( "number_of_color_indexes", self.number_of_color_indexes() as i64 ),
            ( "number_of_required_color_indexes", self.number_of_required_color_indexes() as i64 ),
        ]
    }
}

pub fn read_file_header<R: Read + Seek>( cursor: &mut ByteCursor<R> ) -> Result<BitmapFileHeader> {
    BitmapFileHeader::from_cursor( cursor )
}

pub fn read_dib_header<R: Read + Seek>( cursor: &mut ByteCursor<R> ) -> Result<DibHeader> {
    DibHeader::from_cursor( cursor )
}
