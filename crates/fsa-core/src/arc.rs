// Arc record with a fixed, flat memory layout.

use bytemuck::{Pod, Zeroable};

/// Label of an epsilon arc.
pub const EPSILON: i32 = 0;

/// Label carried by every arc that enters the final state, and by no other arc.
pub const FINAL_SYMBOL: i32 = -1;

/// One arc of an FSA (12 bytes).
///
/// `#[repr(C)]` with three `i32` fields, so an arc table can be reinterpreted
/// as a flat `[src, dest, label, src, dest, label, ...]` buffer with
/// [`bytemuck::cast_slice`] and handed to code that expects that layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Arc {
    pub src_state: i32,
    pub dest_state: i32,
    pub label: i32,
}

impl Arc {
    #[inline]
    pub const fn new(src_state: i32, dest_state: i32, label: i32) -> Self {
        Self {
            src_state,
            dest_state,
            label,
        }
    }

    /// Whether this arc carries the final-state label.
    #[inline]
    pub fn is_final(&self) -> bool {
        self.label == FINAL_SYMBOL
    }
}

/// View an arc table as a flat `i32` buffer (three entries per arc).
#[inline]
pub fn arcs_as_i32(arcs: &[Arc]) -> &[i32] {
    bytemuck::cast_slice(arcs)
}

/// Reinterpret a flat `i32` buffer as an arc table.
///
/// Returns `None` when the buffer length is not a multiple of three.
#[inline]
pub fn arcs_from_i32(flat: &[i32]) -> Option<&[Arc]> {
    bytemuck::try_cast_slice(flat).ok()
}

const _: () = assert!(size_of::<Arc>() == 12);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_size() {
        assert_eq!(size_of::<Arc>(), 12);
        assert_eq!(align_of::<Arc>(), 4);
    }

    #[test]
    fn final_label() {
        assert!(Arc::new(0, 1, FINAL_SYMBOL).is_final());
        assert!(!Arc::new(0, 1, EPSILON).is_final());
        assert!(!Arc::new(0, 1, 7).is_final());
    }

    #[test]
    fn flat_view_layout() {
        let arcs = [Arc::new(0, 1, 5), Arc::new(1, 2, FINAL_SYMBOL)];
        assert_eq!(arcs_as_i32(&arcs), &[0, 1, 5, 1, 2, -1]);
    }

    #[test]
    fn flat_buffer_to_arcs() {
        let flat = [0, 2, 3, 2, 4, -1];
        let arcs = arcs_from_i32(&flat).unwrap();
        assert_eq!(arcs.len(), 2);
        assert_eq!(arcs[0], Arc::new(0, 2, 3));
        assert!(arcs[1].is_final());
    }

    #[test]
    fn flat_buffer_with_partial_arc() {
        let flat = [0, 1, 2, 3];
        assert!(arcs_from_i32(&flat).is_none());
    }
}
