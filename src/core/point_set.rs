use super::header::HeaderErr;
use super::shared::SizeErr;

/// Contents of a `.node` file: points with optional per-point attributes and
/// an optional boundary marker.
///
/// All three arrays are flat and record-major: point `i` owns
/// `coordinates[i*dimension..(i+1)*dimension]`, and likewise for attributes
/// and boundary markers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    pub point_count: u32,
    /// 2 or 3.
    pub dimension: u32,
    pub attribute_count: u32,
    /// 0 or 1.
    pub boundary_marker_count: u32,
    pub coordinates: Vec<f32>,
    pub attributes: Vec<f32>,
    pub boundary_markers: Vec<f32>,
}

impl PointSet {
    /// Creates an empty point set with the given header; records are added with [`PointSet::push_point`].
    pub fn new(point_count: u32, dimension: u32, attribute_count: u32, boundary_marker_count: u32) -> Self {
        Self {
            point_count,
            dimension,
            attribute_count,
            boundary_marker_count,
            ..Default::default()
        }
    }

    /// Appends one record. Slices shorter or longer than the header widths are
    /// stored as given; [`PointSet::check_sizes`] reports the damage.
    pub fn push_point(&mut self, coordinates: &[f32], attributes: &[f32], boundary_markers: &[f32]) {
        self.coordinates.extend_from_slice(coordinates);
        self.attributes.extend_from_slice(attributes);
        self.boundary_markers.extend_from_slice(boundary_markers);
    }

    pub fn check_header(&self) -> Result<(), HeaderErr> {
        if self.point_count == 0 {
            return Err(HeaderErr::EmptyPoints);
        }
        if !matches!(self.dimension, 2 | 3) {
            return Err(HeaderErr::Dimension(self.dimension));
        }
        if self.boundary_marker_count > 1 {
            return Err(HeaderErr::BoundaryMarkerCount(self.boundary_marker_count));
        }
        Ok(())
    }

    /// Checks that every array holds at least `point_count` records.
    pub fn check_sizes(&self) -> Result<(), SizeErr> {
        let n = self.point_count as usize;
        SizeErr::check("coordinates", n * self.dimension as usize, self.coordinates.len())?;
        SizeErr::check("attributes", n * self.attribute_count as usize, self.attributes.len())?;
        SizeErr::check("boundary markers", n * self.boundary_marker_count as usize, self.boundary_markers.len())
    }

    /// Number of numbers on a body line, the leading index included.
    pub fn record_width(&self) -> usize {
        1 + self.dimension as usize + self.attribute_count as usize + self.boundary_marker_count as usize
    }

    /// Number of complete coordinate records actually stored.
    pub fn num_records(&self) -> usize {
        match self.dimension {
            0 => 0,
            d => self.coordinates.len() / d as usize,
        }
    }

    pub fn point(&self, i: usize) -> &[f32] {
        let d = self.dimension as usize;
        &self.coordinates[i * d..(i + 1) * d]
    }

    pub fn attributes_of(&self, i: usize) -> &[f32] {
        let a = self.attribute_count as usize;
        &self.attributes[i * a..(i + 1) * a]
    }

    pub fn boundary_marker_of(&self, i: usize) -> Option<f32> {
        match self.boundary_marker_count {
            0 => None,
            _ => self.boundary_markers.get(i).copied(),
        }
    }
}
