//! # Geometry — The Fixed-Capacity Vertex and Index Arrays
//!
//! Both arrays are allocated once with their full capacity and reused every
//! frame. Writes are append-only between resets; the index cursor of the
//! in-progress batch is simply the current index count.
//!
//! Positions arrive here already transformed. The batcher composes the camera
//! matrix and the transform stack top before calling [`Geometry::push_vertex`].

use super::error::BatchError;
use super::vertex::Vertex;

pub(crate) struct Geometry {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    max_vertices: usize,
    max_indices: usize,
}

impl Geometry {
    pub fn new(max_vertices: usize, max_indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(max_vertices),
            indices: Vec::with_capacity(max_indices),
            max_vertices,
            max_indices,
        }
    }

    /// Append a vertex and return its slot.
    pub fn push_vertex(&mut self, vertex: Vertex) -> Result<u32, BatchError> {
        if self.vertices.len() >= self.max_vertices {
            return Err(BatchError::VertexCapacity {
                requested: self.vertices.len() + 1,
                max: self.max_vertices,
            });
        }
        let slot = self.vertices.len() as u32;
        self.vertices.push(vertex);
        Ok(slot)
    }

    /// Append an index at the write cursor.
    pub fn push_index(&mut self, index: u32) -> Result<(), BatchError> {
        if self.indices.len() >= self.max_indices {
            return Err(BatchError::IndexCapacity {
                requested: self.indices.len() + 1,
                max: self.max_indices,
            });
        }
        self.indices.push(index);
        Ok(())
    }

    /// Fail unless `vertices` more vertices and `indices` more indices fit.
    pub fn reserve(&self, vertices: usize, indices: usize) -> Result<(), BatchError> {
        let want_vertices = self.vertices.len() + vertices;
        if want_vertices > self.max_vertices {
            return Err(BatchError::VertexCapacity {
                requested: want_vertices,
                max: self.max_vertices,
            });
        }
        let want_indices = self.indices.len() + indices;
        if want_indices > self.max_indices {
            return Err(BatchError::IndexCapacity {
                requested: want_indices,
                max: self.max_indices,
            });
        }
        Ok(())
    }

    pub fn remaining(&self) -> (usize, usize) {
        (
            self.max_vertices - self.vertices.len(),
            self.max_indices - self.indices.len(),
        )
    }

    /// The index write cursor.
    pub fn index_cursor(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn capacity(&self) -> (usize, usize) {
        (self.max_vertices, self.max_indices)
    }

    /// Zero both cursors. The allocations are kept.
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}
