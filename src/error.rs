use std::error;
use std::fmt;
use std::io;

/// Everything that can go wrong while decoding bitmap headers.
///
/// Every variant is fatal to the decode it occurred in. Nothing is retried,
/// the header bytes would not change on a second attempt.
#[derive( Debug )]
pub enum Error {
    /// Fewer bytes are left in the source than a read asked for.
    UnexpectedEof { wanted: usize, remaining: u64 },
    /// The underlying source failed or a skip/seek landed out of bounds.
    Read( io::Error ),
    /// A caller asked for an integer width outside of 1 to 8 bytes.
    UnsupportedWidth( u8 ),
    /// The DIB header size matches none of the known header variants.
    InvalidHeaderSize( u32 ),
    InvalidPlaneCount( u16 ),
    InvalidBitsPerPixel( u16 ),
    UnsupportedCompression( u32 ),
    /// Only raised when signature checking was requested.
    InvalidSignature( u16 ),
}

pub type Result<T> = ::std::result::Result<T, Error>;

pub( crate ) fn read_error<S>( message: S ) -> Error
    where S: Into<String> {

    Error::Read( io::Error::new( io::ErrorKind::InvalidInput, message.into() ) )
}

impl Error {
    /// True for errors caused by the bytes themselves, as opposed to
    /// truncation, source failures or misuse of the cursor.
    pub fn is_invalid_data( &self ) -> bool {
        match *self {
            Error::InvalidHeaderSize( _ )
            | Error::InvalidPlaneCount( _ )
            | Error::InvalidBitsPerPixel( _ )
            | Error::UnsupportedCompression( _ )
            | Error::InvalidSignature( _ ) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Error {
    fn fmt( &self, f: &mut fmt::Formatter ) -> fmt::Result {
        match *self {
            Error::UnexpectedEof { wanted, remaining } => write!( f,
                "unexpected end of input: wanted {} bytes but only {} remain", wanted, remaining ),
            Error::Read( ref err ) => write!( f, "read error: {}", err ),
            Error::UnsupportedWidth( n ) => write!( f,
                "unsupported integer width of {} bytes, expected 1 to 8", n ),
            Error::InvalidHeaderSize( size ) => write!( f, "invalid header size {}", size ),
            Error::InvalidPlaneCount( planes ) => write!( f,
                "invalid plane count {}, expected 1", planes ),
            Error::InvalidBitsPerPixel( bpp ) => write!( f, "invalid bits per pixel {}", bpp ),
            Error::UnsupportedCompression( compression ) => write!( f,
                "unsupported compression {}, only uncompressed bitmaps are supported", compression ),
            Error::InvalidSignature( id ) => write!( f,
                "invalid file signature 0x{:04X}, expected \"BM\"", id ),
        }
    }
}

impl error::Error for Error {
    fn source( &self ) -> Option<&( dyn error::Error + 'static )> {
        match *self {
            Error::Read( ref err ) => Some( err ),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from( err: io::Error ) -> Error {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Error::UnexpectedEof { wanted: 0, remaining: 0 },
            _ => Error::Read( err ),
        }
    }
}

impl From<Error> for io::Error {
    fn from( err: Error ) -> io::Error {
        match err {
            Error::Read( inner ) => inner,
            Error::UnexpectedEof { .. } => io::Error::new( io::ErrorKind::UnexpectedEof, err.to_string() ),
            Error::UnsupportedWidth( _ ) => io::Error::new( io::ErrorKind::InvalidInput, err.to_string() ),
            _ => io::Error::new( io::ErrorKind::InvalidData, err.to_string() ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eof_converts_to_truncation() {
        let err: Error = io::Error::new( io::ErrorKind::UnexpectedEof, "short" ).into();
        assert!( matches!( err, Error::UnexpectedEof { .. } ) );

        let err: Error = io::Error::new( io::ErrorKind::Other, "broken pipe" ).into();
        assert!( matches!( err, Error::Read( _ ) ) );
    }

    #[test]
    fn data_errors_become_invalid_data() {
        let err: io::Error = Error::InvalidPlaneCount( 2 ).into();
        assert_eq!( err.kind(), io::ErrorKind::InvalidData );
        assert!( err.to_string().contains( "plane count 2" ) );

        let err: io::Error = Error::UnexpectedEof { wanted: 4, remaining: 1 }.into();
        assert_eq!( err.kind(), io::ErrorKind::UnexpectedEof );
    }

    #[test]
    fn classifies_data_errors() {
        assert!( Error::InvalidHeaderSize( 99 ).is_invalid_data() );
        assert!( Error::UnsupportedCompression( 1 ).is_invalid_data() );
        assert!( !Error::UnsupportedWidth( 9 ).is_invalid_data() );
        assert!( !Error::UnexpectedEof { wanted: 2, remaining: 0 }.is_invalid_data() );
    }
}
