//! # cursor
//!
//! Checked little-endian access to a finite, seekable byte source.
use std::io::{
    self,
    Read,
    Seek,
    SeekFrom,
};

use byteorder::{
    ReadBytesExt,
    LittleEndian,
};

use log::trace;

use crate::error::{
    read_error,
    Error,
    Result,
};

/// Reads unsigned integers of 1 to 8 bytes in little-endian order from a
/// `Read + Seek` source.
///
/// The length of the source is measured once when the cursor is created.
/// Reads that would run past it fail before any byte is consumed, so a
/// failed read never moves the cursor.
pub struct ByteCursor<R> {
    inner: R,
    position: u64,
    len: u64,
}

impl<R: Read + Seek> ByteCursor<R> {
    /// Wraps `inner`, starting at its current stream position.
    pub fn new( mut inner: R ) -> Result<ByteCursor<R>> {
        let position = inner.seek( SeekFrom::Current( 0 ) )?;
        let len = inner.seek( SeekFrom::End( 0 ) )?;
        inner.seek( SeekFrom::Start( position ) )?;

        Ok( ByteCursor { inner, position, len } )
    }

    /// Absolute offset of the next byte to be read.
    pub fn position( &self ) -> u64 {
        self.position
    }

    /// Total length of the source in bytes.
    pub fn len( &self ) -> u64 {
        self.len
    }

    pub fn is_empty( &self ) -> bool {
        self.len == 0
    }

    pub fn remaining( &self ) -> u64 {
        self.len.saturating_sub( self.position )
    }

    pub fn into_inner( self ) -> R {
        self.inner
    }

    /// Reads `n` bytes as a little-endian unsigned integer.
    ///
    /// On failure the source is rewound to `position()`, whatever the inner
    /// reader consumed before failing.
    pub fn read_uint( &mut self, n: u8 ) -> Result<u64> {
        if n == 0 || n > 8 {
            return Err( Error::UnsupportedWidth( n ) );
        }

        let wanted = n as usize;
        let remaining = self.remaining();
        if remaining < n as u64 {
            return Err( Error::UnexpectedEof { wanted, remaining } );
        }

        let value = match self.inner.read_uint::<LittleEndian>( wanted ) {
            Ok( value ) => value,
            Err( err ) => {
                // The source may have consumed part of the value, rewind it.
                self.inner.seek( SeekFrom::Start( self.position ) ).map_err( Error::Read )?;

                return Err( match err.kind() {
                    io::ErrorKind::UnexpectedEof => Error::UnexpectedEof { wanted, remaining },
                    _ => Error::Read( err ),
                } );
            },
        };

        trace!( "read {} bytes at offset {}: {}", n, self.position, value );
        self.position += n as u64;

        Ok( value )
    }

    pub fn read_u16( &mut self ) -> Result<u16> {
        Ok( self.read_uint( 2 )? as u16 )
    }

    pub fn read_u32( &mut self ) -> Result<u32> {
        Ok( self.read_uint( 4 )? as u32 )
    }

    /// Same bit pattern as `read_u32`, reinterpreted as two's complement.
    pub fn read_i32( &mut self ) -> Result<i32> {
        Ok( self.read_u32()? as i32 )
    }

    pub fn read_u64( &mut self ) -> Result<u64> {
        self.read_uint( 8 )
    }

    /// Moves forward `n` bytes without reading them.
    pub fn skip( &mut self, n: u64 ) -> Result<()> {
        let target = self.position.checked_add( n )
            .ok_or_else( || read_error( format!( "cannot skip {} bytes", n ) ) )?;

        if target > self.len {
            return Err( read_error( format!(
                "skipping {} bytes at offset {} runs past the end of input ({} bytes)",
                n, self.position, self.len ) ) );
        }

        self.seek_to( target )
    }

    /// Repositions to an absolute offset, which may be anywhere from 0 up to
    /// and including the end of the source.
    pub fn seek_to( &mut self, offset: u64 ) -> Result<()> {
        if offset > self.len {
            return Err( read_error( format!(
                "offset {} is beyond the end of input ({} bytes)", offset, self.len ) ) );
        }

        self.inner.seek( SeekFrom::Start( offset ) ).map_err( Error::Read )?;
        self.position = offset;

        Ok( () )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn cursor( bytes: &[u8] ) -> ByteCursor<Cursor<&[u8]>> {
        ByteCursor::new( Cursor::new( bytes ) ).unwrap()
    }

    #[test]
    fn reads_little_endian() {
        let mut c = cursor( &[ 0x42, 0x4D, 0x78, 0x56, 0x34, 0x12, 0xFF, 0xFF, 0xFF, 0xFF ] );

        assert_eq!( c.read_u16().unwrap(), 0x4D42 );
        assert_eq!( c.read_u32().unwrap(), 0x12345678 );
        assert_eq!( c.read_i32().unwrap(), -1 );
        assert_eq!( c.position(), 10 );
        assert_eq!( c.remaining(), 0 );
    }

    #[test]
    fn reads_odd_widths() {
        let mut c = cursor( &[ 0x01, 0x02, 0x03, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07 ] );

        assert_eq!( c.read_uint( 3 ).unwrap(), 0x030201 );
        assert_eq!( c.read_uint( 7 ).unwrap(), 0x07060504030201 );
    }

    #[test]
    fn reads_u64() {
        let mut c = cursor( &[ 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x81 ] );

        assert_eq!( c.read_u64().unwrap(), 0x8102030405060708 );
    }

    #[test]
    fn rejects_unsupported_widths() {
        let mut c = cursor( &[ 0; 16 ] );

        assert!( matches!( c.read_uint( 0 ), Err( Error::UnsupportedWidth( 0 ) ) ) );
        assert!( matches!( c.read_uint( 9 ), Err( Error::UnsupportedWidth( 9 ) ) ) );
        assert_eq!( c.position(), 0 );
    }

    #[test]
    fn short_read_consumes_nothing() {
        let mut c = cursor( &[ 0xAA, 0xBB, 0xCC ] );

        match c.read_u32() {
            Err( Error::UnexpectedEof { wanted, remaining } ) => {
                assert_eq!( wanted, 4 );
                assert_eq!( remaining, 3 );
            },
            _ => panic!( "expected a truncation error" ),
        }

        assert_eq!( c.position(), 0 );
        assert_eq!( c.read_u16().unwrap(), 0xBBAA );
    }

    #[test]
    fn skip_stays_in_bounds() {
        let mut c = cursor( &[ 0, 0, 0, 0, 0x34, 0x12 ] );

        c.skip( 4 ).unwrap();
        assert_eq!( c.read_u16().unwrap(), 0x1234 );

        c.skip( 0 ).unwrap();
        assert!( matches!( c.skip( 1 ), Err( Error::Read( _ ) ) ) );
        assert_eq!( c.position(), 6 );
    }

    #[test]
    fn seek_to_repositions() {
        let mut c = cursor( &[ 0x01, 0x02, 0x03 ] );

        c.seek_to( 2 ).unwrap();
        assert_eq!( c.read_uint( 1 ).unwrap(), 0x03 );
        c.seek_to( 0 ).unwrap();
        assert_eq!( c.read_uint( 1 ).unwrap(), 0x01 );
        assert!( c.seek_to( 4 ).is_err() );
    }

    /// Serves `good` bytes from `data`, then fails every read.
    struct FailingSource {
        data: Cursor<Vec<u8>>,
        good: u64,
    }

    impl Read for FailingSource {
        fn read( &mut self, buf: &mut [u8] ) -> io::Result<usize> {
            let left = self.good.saturating_sub( self.data.position() ) as usize;
            if left == 0 {
                return Err( io::Error::new( io::ErrorKind::Other, "disk gone" ) );
            }

            let n = buf.len().min( left ).min( 1 );
            self.data.read( &mut buf[..n] )
        }
    }

    impl Seek for FailingSource {
        fn seek( &mut self, pos: SeekFrom ) -> io::Result<u64> {
            self.data.seek( pos )
        }
    }

    fn failing( good: u64 ) -> FailingSource {
        FailingSource { data: Cursor::new( vec![ 0x42; 100 ] ), good }
    }

    #[test]
    fn broken_source_is_a_read_error() {
        let mut c = ByteCursor::new( failing( 0 ) ).unwrap();

        assert!( matches!( c.read_u32(), Err( Error::Read( _ ) ) ) );
        assert_eq!( c.position(), 0 );

        let err = crate::decode( failing( 0 ) ).unwrap_err();
        assert!( matches!( err, Error::Read( _ ) ) );
        assert!( err.to_string().contains( "disk gone" ) );
    }

    #[test]
    fn failed_read_rewinds_the_source() {
        let mut c = ByteCursor::new( failing( 3 ) ).unwrap();

        assert_eq!( c.read_u16().unwrap(), 0x4242 );
        assert!( matches!( c.read_u32(), Err( Error::Read( _ ) ) ) );
        assert_eq!( c.position(), 2 );
        assert_eq!( c.into_inner().data.position(), 2 );
    }

    #[test]
    fn starts_at_current_stream_position() {
        let mut inner = Cursor::new( &[ 0xFFu8, 0x10, 0x00 ][..] );
        inner.set_position( 1 );

        let mut c = ByteCursor::new( inner ).unwrap();
        assert_eq!( c.position(), 1 );
        assert_eq!( c.remaining(), 2 );
        assert_eq!( c.read_u16().unwrap(), 0x0010 );
    }
}
