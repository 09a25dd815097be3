//! Binary scene parsing into an opaque scene handle.

use std::fmt;

/// Parsed scene graph, owned by the load controller for the lifetime of the
/// mount. Released on unmount or when a new request supersedes this one.
pub struct SceneHandle {
    document: gltf::Document,
    buffers: Vec<gltf::buffer::Data>,
    node_count: usize,
    mesh_count: usize,
    primitive_count: usize,
}

impl SceneHandle {
    pub fn document(&self) -> &gltf::Document {
        &self.document
    }

    pub fn buffers(&self) -> &[gltf::buffer::Data] {
        &self.buffers
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn mesh_count(&self) -> usize {
        self.mesh_count
    }

    pub fn primitive_count(&self) -> usize {
        self.primitive_count
    }
}

impl fmt::Debug for SceneHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneHandle")
            .field("nodes", &self.node_count)
            .field("meshes", &self.mesh_count)
            .field("primitives", &self.primitive_count)
            .finish()
    }
}

/// Parse glTF/GLB bytes. The error is the parser's own message; the
/// controller wraps it into its failure taxonomy.
pub fn parse_scene(bytes: &[u8]) -> Result<SceneHandle, String> {
    let (document, buffers, _images) =
        gltf::import_slice(bytes).map_err(|err| err.to_string())?;

    let node_count = document.nodes().count();
    let mesh_count = document.meshes().count();
    let primitive_count = document
        .meshes()
        .map(|mesh| mesh.primitives().count())
        .sum();

    Ok(SceneHandle {
        document,
        buffers,
        node_count,
        mesh_count,
        primitive_count,
    })
}

/// Smallest document the parser accepts; shared by tests across the crate.
#[cfg(test)]
pub(crate) const EMPTY_GLTF: &[u8] = br#"{"asset":{"version":"2.0"}}"#;
