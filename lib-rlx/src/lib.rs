pub mod codec;
pub mod constants;
pub mod raster;
pub mod screen5;

use log::*;
use std::fs::File;
use std::io::Write;

pub use crate::codec::{decode, encode, EncodeOptions, EncodedImage};
pub use crate::raster::{IndexRaster, PixelRaster, Rgb};
pub use crate::screen5::{emit, LoaderScript};

pub fn init_logging() {
    let target = Box::new(File::create("log.txt").expect("Can't create file"));

    env_logger::Builder::new()
        .target(env_logger::Target::Pipe(target))
        .filter(Some("lib_rlx"), LevelFilter::Debug)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}
