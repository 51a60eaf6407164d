use std::ffi::OsStr;
use std::fs::File;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::{BufWriter, Write};

use genelist_core::errors::OutputError;
use genelist_core::models::ConsolidatedLine;

pub trait BedWrite {
    ///
    /// Write lines to any writer, one per row, four tab separated columns.
    ///
    /// # Arguments
    /// - writer: the sink
    /// - chr_prefix: whether chromosome labels carry the `chr` prefix
    fn write_to<W: Write>(&self, writer: W, chr_prefix: bool) -> std::io::Result<()>;

    ///
    /// Write data to disk as bed file
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    /// - chr_prefix: whether chromosome labels carry the `chr` prefix
    fn write_bed<T: AsRef<Path>>(&self, path: T, chr_prefix: bool) -> std::io::Result<()>;

    ///
    /// Write data to disk as bed.gz file
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    /// - chr_prefix: whether chromosome labels carry the `chr` prefix
    fn write_bed_gz<T: AsRef<Path>>(&self, path: T, chr_prefix: bool) -> std::io::Result<()>;
}

impl BedWrite for [ConsolidatedLine] {
    fn write_to<W: Write>(&self, writer: W, chr_prefix: bool) -> std::io::Result<()> {
        let mut writer = BufWriter::new(writer);
        for line in self {
            writeln!(writer, "{}", line.as_string(chr_prefix))?;
        }
        writer.flush()
    }

    fn write_bed<T: AsRef<Path>>(&self, path: T, chr_prefix: bool) -> std::io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        self.write_to(file, chr_prefix)
    }

    fn write_bed_gz<T: AsRef<Path>>(&self, path: T, chr_prefix: bool) -> std::io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::best());

        for line in self {
            writeln!(encoder, "{}", line.as_string(chr_prefix))?;
        }

        encoder.finish()?;
        Ok(())
    }
}

///
/// Emit consolidated lines to `path`, gzip compressed when the path ends in `.gz`.
///
/// An empty slice still produces an (empty) file.
///
pub fn emit<T: AsRef<Path>>(
    lines: &[ConsolidatedLine],
    path: T,
    chr_prefix: bool,
) -> Result<(), OutputError> {
    let path = path.as_ref();
    let result = match path.extension() == Some(OsStr::new("gz")) {
        true => lines.write_bed_gz(path, chr_prefix),
        false => lines.write_bed(path, chr_prefix),
    };

    result.map_err(|source| OutputError {
        path: path.to_path_buf(),
        source,
    })
}
