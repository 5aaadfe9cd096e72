//! `.ele` files: tetrahedra given as one-based references into a `.node` file.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, error};

use super::text::{self, SignificantLines};
use super::{check_record_count, Config, Err, Location};
use crate::core::header::{to_count, HeaderErr};
use crate::core::shared::ConfigType;
use crate::core::ElementSet;

/// Reads an `.ele` file with the default [`Config`].
///
/// Node references are converted to zero-based on the way in. They are not
/// checked against any point count.
pub fn parse_element_set<P: AsRef<Path>>(path: P) -> Result<ElementSet, Err> {
    parse_element_set_with(path, &Config::default())
}

/// Failing to open an existing file is an error here just as for `.node`
/// files, and is also logged at error level.
pub fn parse_element_set_with<P: AsRef<Path>>(path: P, cfg: &Config) -> Result<ElementSet, Err> {
    let path = path.as_ref();
    text::ensure_exists(path)?;
    let file = File::open(path).map_err(|e| {
        error!(path = %path.display(), error = %e, "unable to open element file");
        Err::io(path)(e)
    })?;
    let set = read_element_set(BufReader::new(file), path, cfg)?;
    debug!(
        path = %path.display(),
        tetrahedra = set.element_count,
        nodes_per_tetrahedron = set.nodes_per_element,
        attributes = set.attribute_count,
        "read element set"
    );
    Ok(set)
}

pub fn read_element_set<R: BufRead>(reader: R, source: &Path, cfg: &Config) -> Result<ElementSet, Err> {
    let mut set: Option<ElementSet> = None;

    for line in SignificantLines::new(reader) {
        let (line_number, line) = line.map_err(Err::io(source))?;
        let at = || Location::line(source, line_number);

        let Some(set) = set.as_mut() else {
            let [elements, nodes, attributes] = text::header_integers::<3>(&line)
                .ok_or_else(|| Err::MalformedHeader { at: at(), expected: 3 })?;
            let header = header_from(elements, nodes, attributes)
                .map_err(|reason| Err::InvalidHeaderField { at: at(), reason })?;
            set = Some(header);
            continue;
        };

        let width = set.record_width();
        let values = text::record_numbers(&line, width)
            .ok_or_else(|| Err::MalformedRecord { at: at(), expected: width })?;

        let k = set.nodes_per_element as usize;
        let nodes = text::tokens(&line)
            .skip(1)
            .take(k)
            .map(|token| {
                zero_based(token).ok_or_else(|| Err::InvalidNodeReference { at: at(), token: token.to_owned() })
            })
            .collect::<Result<Vec<_>, _>>()?;
        set.push_element(&nodes, &values[1 + k..]);
    }

    let set = set.ok_or_else(|| Err::MissingHeader { path: source.to_path_buf() })?;
    check_record_count(source, set.element_count, set.num_records(), cfg)?;
    Ok(set)
}

fn header_from(elements: i64, nodes: i64, attributes: i64) -> Result<ElementSet, HeaderErr> {
    if elements <= 0 {
        return Err(HeaderErr::EmptyElements);
    }
    let set = ElementSet::new(
        to_count("number of tetrahedra", elements)?,
        to_count("nodes per tetrahedron", nodes)?,
        to_count("number of attributes", attributes)?,
    );
    set.check_header()?;
    Ok(set)
}

/// Converts a one-based reference token to a zero-based index.
///
/// Integral tokens are parsed exactly; float spellings such as `3.0` are
/// accepted as long as they are whole.
fn zero_based(token: &str) -> Option<u32> {
    let one_based = token.parse::<u64>().ok().or_else(|| {
        let value = token.parse::<f64>().ok()?;
        (value.fract() == 0.0 && value >= 1.0).then_some(value as u64)
    })?;
    u32::try_from(one_based.checked_sub(1)?).ok()
}

/// Writes `set` as an `.ele` file with one-based node references.
///
/// Validation happens before the file is created.
pub fn write_element_set<P: AsRef<Path>>(path: P, set: &ElementSet) -> Result<(), Err> {
    let path = path.as_ref();
    validate(set, path)?;

    let file = File::create(path).map_err(Err::io(path))?;
    let mut writer = BufWriter::new(file);
    emit(&mut writer, set)
        .and_then(|()| writer.flush())
        .map_err(Err::io(path))?;

    debug!(path = %path.display(), tetrahedra = set.element_count, "wrote element set");
    Ok(())
}

pub fn write_element_set_to<W: Write>(mut writer: W, set: &ElementSet, target: &Path) -> Result<(), Err> {
    validate(set, target)?;
    emit(&mut writer, set).map_err(Err::io(target))
}

fn validate(set: &ElementSet, target: &Path) -> Result<(), Err> {
    set.check_header()
        .map_err(|reason| Err::InvalidHeaderField { at: Location::file(target), reason })?;
    set.check_sizes()
        .map_err(|reason| Err::SizeMismatch { at: Location::file(target), reason })
}

fn emit<W: Write>(writer: &mut W, set: &ElementSet) -> std::io::Result<()> {
    writeln!(
        writer,
        "{} {} {}",
        set.element_count, set.nodes_per_element, set.attribute_count
    )?;
    for i in 0..set.element_count as usize {
        write!(writer, "{}", i)?;
        for &node in set.element(i) {
            write!(writer, " {}", u64::from(node) + 1)?;
        }
        for value in set.attributes_of(i) {
            write!(writer, " {}", value)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
