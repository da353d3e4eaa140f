use crate::VertexIndex;

/// Errors related to [TriangleMeshes](crate::TriangleMesh).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("Attribute `{attribute}` has {found} elements, but the mesh needs {expected}")]
    AttributeLength {
        attribute: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Triangle {triangle} references vertex {vertex}, but the mesh has {vertices} vertices")]
    VertexOutOfRange {
        triangle: usize,
        vertex: VertexIndex,
        vertices: usize,
    },
    #[error("Removal mask has {found} entries, but there are {expected} elements")]
    MaskLength { expected: usize, found: usize },
    #[error("Attempted to remove element {index} of {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("A mesh can hold at most {max} vertices; got {found}")]
    TooManyVertices { max: usize, found: usize },
}
