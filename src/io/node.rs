//! `.node` files: point coordinates, per-point attributes and boundary markers.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use super::text::{self, SignificantLines};
use super::{check_record_count, Config, Err, Location};
use crate::core::header::{to_count, HeaderErr};
use crate::core::shared::ConfigType;
use crate::core::PointSet;

/// Reads a `.node` file with the default [`Config`].
pub fn parse_point_set<P: AsRef<Path>>(path: P) -> Result<PointSet, Err> {
    parse_point_set_with(path, &Config::default())
}

pub fn parse_point_set_with<P: AsRef<Path>>(path: P, cfg: &Config) -> Result<PointSet, Err> {
    let path = path.as_ref();
    text::ensure_exists(path)?;
    let file = File::open(path).map_err(Err::io(path))?;
    let set = read_point_set(BufReader::new(file), path, cfg)?;
    debug!(
        path = %path.display(),
        points = set.point_count,
        dimension = set.dimension,
        attributes = set.attribute_count,
        markers = set.boundary_marker_count,
        "read point set"
    );
    Ok(set)
}

/// Parses `.node` content from `reader`; `source` only labels errors.
pub fn read_point_set<R: BufRead>(reader: R, source: &Path, cfg: &Config) -> Result<PointSet, Err> {
    let mut set: Option<PointSet> = None;

    for line in SignificantLines::new(reader) {
        let (line_number, line) = line.map_err(Err::io(source))?;
        let at = || Location::line(source, line_number);

        let Some(set) = set.as_mut() else {
            let [points, dimension, attributes, markers] = text::header_integers::<4>(&line)
                .ok_or_else(|| Err::MalformedHeader { at: at(), expected: 4 })?;
            let header = header_from(points, dimension, attributes, markers)
                .map_err(|reason| Err::InvalidHeaderField { at: at(), reason })?;
            set = Some(header);
            continue;
        };

        let width = set.record_width();
        let values = text::record_numbers(&line, width)
            .ok_or_else(|| Err::MalformedRecord { at: at(), expected: width })?;

        // values[0] is the point's index, which is not checked
        let (coordinates, rest) = values[1..].split_at(set.dimension as usize);
        let (attributes, markers) = rest.split_at(set.attribute_count as usize);
        set.push_point(coordinates, attributes, markers);
    }

    let set = set.ok_or_else(|| Err::MissingHeader { path: source.to_path_buf() })?;
    check_record_count(source, set.point_count, set.num_records(), cfg)?;
    Ok(set)
}

fn header_from(points: i64, dimension: i64, attributes: i64, markers: i64) -> Result<PointSet, HeaderErr> {
    if points <= 0 {
        return Err(HeaderErr::EmptyPoints);
    }
    let set = PointSet::new(
        to_count("number of points", points)?,
        to_count("dimension", dimension)?,
        to_count("number of attributes", attributes)?,
        to_count("number of boundary markers", markers)?,
    );
    set.check_header()?;
    Ok(set)
}

/// Writes `set` as a `.node` file, replacing any existing file.
///
/// The header and array lengths are validated before the file is created, so
/// an invalid set leaves the filesystem untouched.
pub fn write_point_set<P: AsRef<Path>>(path: P, set: &PointSet) -> Result<(), Err> {
    let path = path.as_ref();
    validate(set, path)?;

    let file = File::create(path).map_err(Err::io(path))?;
    let mut writer = BufWriter::new(file);
    emit(&mut writer, set)
        .and_then(|()| writer.flush())
        .map_err(Err::io(path))?;

    debug!(path = %path.display(), points = set.point_count, "wrote point set");
    Ok(())
}

/// Serializes `set` to `writer`; `target` only labels errors.
pub fn write_point_set_to<W: Write>(mut writer: W, set: &PointSet, target: &Path) -> Result<(), Err> {
    validate(set, target)?;
    emit(&mut writer, set).map_err(Err::io(target))
}

fn validate(set: &PointSet, target: &Path) -> Result<(), Err> {
    set.check_header()
        .map_err(|reason| Err::InvalidHeaderField { at: Location::file(target), reason })?;
    set.check_sizes()
        .map_err(|reason| Err::SizeMismatch { at: Location::file(target), reason })
}

fn emit<W: Write>(writer: &mut W, set: &PointSet) -> std::io::Result<()> {
    writeln!(
        writer,
        "{} {} {} {}",
        set.point_count, set.dimension, set.attribute_count, set.boundary_marker_count
    )?;
    for i in 0..set.point_count as usize {
        write!(writer, "{}", i)?;
        let marker = set.boundary_marker_of(i);
        for value in set.point(i).iter().chain(set.attributes_of(i)).chain(marker.iter()) {
            write!(writer, " {}", value)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
