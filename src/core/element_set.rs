use super::header::HeaderErr;
use super::shared::SizeErr;

/// Contents of an `.ele` file: tetrahedra as lists of point indices.
///
/// `nodes` is always zero-based in memory; the one-based numbering of the
/// text format is applied only by the `.ele` reader and writer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementSet {
    pub element_count: u32,
    /// 4 (corners) or 10 (corners and edge midpoints).
    pub nodes_per_element: u32,
    pub attribute_count: u32,
    pub nodes: Vec<u32>,
    pub attributes: Vec<f32>,
}

impl ElementSet {
    pub fn new(element_count: u32, nodes_per_element: u32, attribute_count: u32) -> Self {
        Self {
            element_count,
            nodes_per_element,
            attribute_count,
            ..Default::default()
        }
    }

    pub fn push_element(&mut self, nodes: &[u32], attributes: &[f32]) {
        self.nodes.extend_from_slice(nodes);
        self.attributes.extend_from_slice(attributes);
    }

    pub fn check_header(&self) -> Result<(), HeaderErr> {
        if self.element_count == 0 {
            return Err(HeaderErr::EmptyElements);
        }
        if !matches!(self.nodes_per_element, 4 | 10) {
            return Err(HeaderErr::NodesPerElement(self.nodes_per_element));
        }
        Ok(())
    }

    pub fn check_sizes(&self) -> Result<(), SizeErr> {
        let n = self.element_count as usize;
        SizeErr::check("nodes", n * self.nodes_per_element as usize, self.nodes.len())?;
        SizeErr::check("attributes", n * self.attribute_count as usize, self.attributes.len())
    }

    /// Number of numbers on a body line, the leading index included.
    pub fn record_width(&self) -> usize {
        1 + self.nodes_per_element as usize + self.attribute_count as usize
    }

    pub fn num_records(&self) -> usize {
        match self.nodes_per_element {
            0 => 0,
            k => self.nodes.len() / k as usize,
        }
    }

    pub fn element(&self, i: usize) -> &[u32] {
        let k = self.nodes_per_element as usize;
        &self.nodes[i * k..(i + 1) * k]
    }

    pub fn attributes_of(&self, i: usize) -> &[f32] {
        let a = self.attribute_count as usize;
        &self.attributes[i * a..(i + 1) * a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_domains() {
        assert!(ElementSet::new(1, 4, 0).check_header().is_ok());
        assert!(ElementSet::new(1, 10, 2).check_header().is_ok());
        assert_eq!(ElementSet::new(1, 6, 0).check_header(), Err(HeaderErr::NodesPerElement(6)));
        assert_eq!(ElementSet::new(0, 4, 0).check_header(), Err(HeaderErr::EmptyElements));
    }

    #[test]
    fn records() {
        let mut set = ElementSet::new(2, 4, 1);
        set.push_element(&[0, 1, 2, 3], &[0.5]);
        set.push_element(&[1, 2, 3, 4], &[1.5]);
        assert_eq!(set.record_width(), 6);
        assert_eq!(set.num_records(), 2);
        assert_eq!(set.element(1), &[1, 2, 3, 4]);
        assert_eq!(set.attributes_of(1), &[1.5]);
        assert!(set.check_sizes().is_ok());

        assert_eq!(ElementSet::new(1, 10, u32::MAX).record_width(), 11 + u32::MAX as usize);

        set.element_count = 3;
        assert_eq!(
            set.check_sizes(),
            Err(SizeErr { array: "nodes", expected: 12, found: 8 })
        );
    }
}
