use std::error::Error as StdError;
use std::fs::File;
use std::io::{
    self,
    BufReader,
    Write,
};
use std::path::PathBuf;
use std::process::exit;

use clap::builder::PossibleValue;
use clap::{
    value_parser,
    Arg,
    ArgAction,
    ArgMatches,
    Command,
    ValueEnum,
};
use log::{
    debug,
    LevelFilter,
};

use bmp_info::render;
use bmp_info::DecodeOptions;

#[derive( Copy, Clone, Debug, Eq, PartialEq )]
enum Format {
    Text,
    Json,
}

impl ValueEnum for Format {
    fn value_variants<'a>() -> &'a [Self] {
        &[ Self::Text, Self::Json ]
    }

    fn to_possible_value( &self ) -> Option<PossibleValue> {
        Some( match self {
            Self::Text => PossibleValue::new( "text" ),
            Self::Json => PossibleValue::new( "json" ),
        } )
    }
}

#[rustfmt::skip]
fn create_cmd_args() -> Command {
    Command::new( "bmpinfo" )
        .about( "Prints the file header and DIB header of a bmp file" )
        .arg( Arg::new( "file" )
            .value_name( "FILE" )
            .help( "Bitmap file to read" )
            .value_parser( value_parser!( PathBuf ) )
            .required( true ) )
        .arg( Arg::new( "format" )
            .long( "format" )
            .short( 'f' )
            .help( "Output format" )
            .value_parser( value_parser!( Format ) )
            .default_value( "text" ) )
        .arg( Arg::new( "check-signature" )
            .long( "check-signature" )
            .action( ArgAction::SetTrue )
            .help( "Fail unless the file starts with \"BM\"" ) )
        .arg( Arg::new( "debug" )
            .long( "debug" )
            .action( ArgAction::SetTrue )
            .help_heading( "LOGGING" )
            .help( "Display debug information and higher" ) )
        .arg( Arg::new( "trace" )
            .long( "trace" )
            .action( ArgAction::SetTrue )
            .help_heading( "LOGGING" )
            .help( "Display every field as it is read" ) )
}

fn setup_logger( options: &ArgMatches ) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or( "warn" ) );

    if options.get_flag( "trace" ) {
        builder.filter_level( LevelFilter::Trace );
    } else if options.get_flag( "debug" ) {
        builder.filter_level( LevelFilter::Debug );
    }

    builder.init();
}

fn run( options: &ArgMatches ) -> Result<String, Box<dyn StdError>> {
    let path = options.get_one::<PathBuf>( "file" )
        .ok_or( "missing input file" )?;
    let format = options.get_one::<Format>( "format" ).copied().unwrap_or( Format::Text );
    let decode_options = DecodeOptions::new()
        .check_signature( options.get_flag( "check-signature" ) );

    let file = File::open( path )
        .map_err( | err | format!( "cannot open {}: {}", path.display(), err ) )?;

    debug!( "reading headers of {}", path.display() );
    let ( file_header, dib_header ) = bmp_info::decode_with( BufReader::new( file ), &decode_options )?;

    Ok( match format {
        Format::Text => render::to_text( &file_header, &dib_header ),
        Format::Json => render::to_json( &file_header, &dib_header )? + "\n",
    } )
}

fn main() {
    let options = create_cmd_args().get_matches();
    setup_logger( &options );

    match run( &options ) {
        Ok( output ) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            if let Err( err ) = handle.write_all( output.as_bytes() ) {
                eprintln!( "error: {}", err );
                exit( 1 );
            }
        },
        Err( err ) => {
            eprintln!( "error: {}", err );
            exit( 1 );
        },
    }
}
