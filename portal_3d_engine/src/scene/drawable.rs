/// Drawable content — meshes, placed instances and groups of instances.
///
/// A `DrawGroup` is what a device draws in one call: the content of a scene,
/// the shape of a portal, or a batch of portal shapes.

use std::sync::Arc;
use glam::{Mat4, Vec3};
use crate::error::Result;
use crate::engine_bail;

// ===== AABB =====

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// An inverted box that any `union` replaces.
    pub const EMPTY: AABB = AABB {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Tight box around a set of points. Empty input gives `AABB::EMPTY`.
    pub fn from_points(points: &[Vec3]) -> AABB {
        points.iter().fold(AABB::EMPTY, |acc, p| AABB {
            min: acc.min.min(*p),
            max: acc.max.max(*p),
        })
    }

    /// True if no point was ever added.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Transform this AABB by a matrix, returning a new AABB.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the AABB extents
    /// for an exact (tight) result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        if self.is_empty() {
            return *self;
        }

        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }
}

// ===== MESH =====

/// Indexed triangle list with a flat RGBA color.
#[derive(Debug, Clone)]
pub struct Mesh {
    name: String,
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    color: [f32; 4],
    bounds: AABB,
}

impl Mesh {
    /// Create a mesh, validating the index list.
    ///
    /// # Errors
    ///
    /// Returns an error if the index count is not a multiple of 3 or an index
    /// is out of range.
    pub fn new(name: &str, positions: Vec<Vec3>, indices: Vec<u32>, color: [f32; 4]) -> Result<Self> {
        if indices.len() % 3 != 0 {
            engine_bail!("portal3d::Mesh",
                "Mesh '{}' has {} indices, expected a multiple of 3", name, indices.len());
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            engine_bail!("portal3d::Mesh",
                "Mesh '{}' index {} out of range ({} vertices)", name, bad, positions.len());
        }

        let bounds = AABB::from_points(&positions);
        Ok(Self {
            name: name.to_string(),
            positions,
            indices,
            color,
            bounds,
        })
    }

    /// Axis-aligned quad in the local XY plane, centred on the origin,
    /// facing +Z.
    pub fn quad(name: &str, width: f32, height: f32, color: [f32; 4]) -> Self {
        let hw = width * 0.5;
        let hh = height * 0.5;
        let positions = vec![
            Vec3::new(-hw, -hh, 0.0),
            Vec3::new(hw, -hh, 0.0),
            Vec3::new(hw, hh, 0.0),
            Vec3::new(-hw, hh, 0.0),
        ];
        let bounds = AABB::from_points(&positions);
        Self {
            name: name.to_string(),
            positions,
            indices: vec![0, 1, 2, 0, 2, 3],
            color,
            bounds,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    /// Local-space bounds.
    pub fn bounds(&self) -> &AABB {
        &self.bounds
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                self.positions[tri[0] as usize],
                self.positions[tri[1] as usize],
                self.positions[tri[2] as usize],
            ]
        })
    }
}

// ===== DRAW ITEM / GROUP =====

/// A mesh placed by a model matrix.
#[derive(Debug, Clone)]
pub struct DrawItem {
    pub mesh: Arc<Mesh>,
    pub model: Mat4,
}

impl DrawItem {
    pub fn new(mesh: Arc<Mesh>, model: Mat4) -> Self {
        Self { mesh, model }
    }

    /// Bounds after applying the model matrix.
    pub fn bounds(&self) -> AABB {
        self.mesh.bounds().transformed(&self.model)
    }
}

/// Ordered list of draw items.
#[derive(Debug, Clone, Default)]
pub struct DrawGroup {
    items: Vec<DrawItem>,
}

impl DrawGroup {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Group holding a single mesh at the identity transform.
    pub fn from_mesh(mesh: Arc<Mesh>) -> Self {
        Self { items: vec![DrawItem::new(mesh, Mat4::IDENTITY)] }
    }

    pub fn push(&mut self, mesh: Arc<Mesh>, model: Mat4) {
        self.items.push(DrawItem::new(mesh, model));
    }

    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bounds of every item, in the group's space.
    pub fn bounds(&self) -> AABB {
        self.items.iter().fold(AABB::EMPTY, |acc, item| acc.union(&item.bounds()))
    }

    /// Append every item pre-multiplied by `parent` into `out`.
    ///
    /// Used to batch several groups into a single draw without cloning meshes.
    pub fn extend_transformed_into(&self, parent: &Mat4, out: &mut Vec<DrawItem>) {
        out.extend(self.items.iter().map(|item| DrawItem {
            mesh: Arc::clone(&item.mesh),
            model: *parent * item.model,
        }));
    }

    /// Copy of the group with every item pre-multiplied by `parent`.
    pub fn transformed(&self, parent: &Mat4) -> DrawGroup {
        let mut items = Vec::with_capacity(self.items.len());
        self.extend_transformed_into(parent, &mut items);
        DrawGroup { items }
    }
}

#[cfg(test)]
#[path = "drawable_tests.rs"]
mod tests;
