//! # render
//!
//! Turns decoded headers into text or JSON.
use std::io::{
    self,
    Write,
};

use serde::ser::SerializeStruct;
use serde::{
    Serialize,
    Serializer,
};

use crate::header::{
    BitmapFileHeader,
    DibHeader,
};

const INDENT: &str = "  ";

fn text_block( name: &str, fields: &[( &'static str, i64 )] ) -> String {
    let lines: Vec<String> = fields.iter()
        .map( | &( key, value ) | format!( "{}\"{}\": {}", INDENT, key, value ) )
        .collect();

    format!( "\"{}\": {{\n{}\n}}", name, lines.join( ",\n" ) )
}

/// Renders both headers as nested key/value text, one field per line.
pub fn to_text( file: &BitmapFileHeader, dib: &DibHeader ) -> String {
    format!( "{},\n{}\n",
        text_block( "bitmap_file_header", &file.fields() ),
        text_block( "dib_header", &dib.fields() ) )
}

pub fn write_text<W: Write>( out: &mut W, file: &BitmapFileHeader, dib: &DibHeader ) -> io::Result<()> {
    out.write_all( to_text( file, dib ).as_bytes() )
}

fn serialize_fields<S>( serializer: S, name: &'static str, fields: &[( &'static str, i64 )] )
    -> Result<S::Ok, S::Error>
    where S: Serializer {

    let mut state = serializer.serialize_struct( name, fields.len() )?;
    for &( key, value ) in fields {
        state.serialize_field( key, &value )?;
    }
    state.end()
}

impl Serialize for BitmapFileHeader {
    fn serialize<S>( &self, serializer: S ) -> Result<S::Ok, S::Error>
        where S: Serializer {

        serialize_fields( serializer, "BitmapFileHeader", &self.fields() )
    }
}

impl Serialize for DibHeader {
    fn serialize<S>( &self, serializer: S ) -> Result<S::Ok, S::Error>
        where S: Serializer {

        serialize_fields( serializer, "DibHeader", &self.fields() )
    }
}

/// Both headers of one file, serialized as a single object.
pub struct Headers<'a> {
    file: &'a BitmapFileHeader,
    dib: &'a DibHeader,
}

impl<'a> Headers<'a> {
    pub fn new( file: &'a BitmapFileHeader, dib: &'a DibHeader ) -> Headers<'a> {
        Headers { file, dib }
    }
}

impl<'a> Serialize for Headers<'a> {
    fn serialize<S>( &self, serializer: S ) -> Result<S::Ok, S::Error>
        where S: Serializer {

        let mut state = serializer.serialize_struct( "Headers", 2 )?;
        state.serialize_field( "bitmap_file_header", self.file )?;
        state.serialize_field( "dib_header", self.dib )?;
        state.end()
    }
}

pub fn to_json( file: &BitmapFileHeader, dib: &DibHeader ) -> serde_json::Result<String> {
    serde_json::to_string_pretty( &Headers::new( file, dib ) )
}
