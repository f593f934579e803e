//! Sprite shader source and its uniform layout.

use bytemuck::{Pod, Zeroable};

pub const SPRITE_SHADER: &str = include_str!("sprite.wgsl");

/// Matches `Uniforms` in `sprite.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    /// Surface size in pixels.
    pub viewport: [f32; 2],
    pub _padding: [f32; 2],
}

impl Uniforms {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: [width, height],
            _padding: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates WGSL code using naga.
    fn validate_wgsl(code: &str) -> Result<naga::Module, String> {
        let module = naga::front::wgsl::parse_str(code).map_err(|e| format!("WGSL parse error: {:?}", e))?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .map_err(|e| format!("WGSL validation error: {:?}", e))?;

        Ok(module)
    }

    #[test]
    fn test_sprite_shader_validates() {
        let module = validate_wgsl(SPRITE_SHADER).unwrap();
        let entry_points: Vec<_> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
        assert!(entry_points.contains(&"vs_main"));
        assert!(entry_points.contains(&"fs_main"));
    }

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<Uniforms>(), 16);
        assert_eq!(Uniforms::new(800.0, 600.0).viewport, [800.0, 600.0]);
    }

    #[test]
    fn test_kind_constants_match_sprite_kinds() {
        use crate::compositor::SpriteKind;

        for (name, kind) in [
            ("KIND_MIST", SpriteKind::Mist),
            ("KIND_STREAM", SpriteKind::Stream),
            ("KIND_RIPPLE", SpriteKind::Ripple),
            ("KIND_SHEEN", SpriteKind::Sheen),
        ] {
            let decl = format!("const {name}: u32 = {}u;", kind as u32);
            assert!(SPRITE_SHADER.contains(&decl), "missing `{decl}`");
        }
    }
}
