use crate::catalog::HostCatalog;
use crate::engine::Override;
use crate::graphic::{DrawSize, GraphicClass, GraphicData, GraphicInit, ShaderKind};
use crate::part::PartDefinition;
use crate::scan::Resolution;

/// Writes resolved overrides into part appearance fields.
///
/// This is an unconditional overwrite: callers guarantee each part is
/// applied at most once (see [`crate::scan::ProcessedSet`]).
#[derive(Debug)]
pub struct OverrideApplier<H> {
    hook: H,
}

impl<H: GraphicInit> OverrideApplier<H> {
    pub fn new(hook: H) -> Self {
        Self { hook }
    }

    pub fn into_hook(self) -> H {
        self.hook
    }

    pub fn apply(&mut self, part: &mut PartDefinition, resolved: &Override) -> Result<(), H::Error> {
        let graphic = part.graphic.get_or_insert_with(GraphicData::default);
        graphic.draw_size = DrawSize::ONE;

        match &resolved.color_rule {
            Some(rule) => {
                graphic.class = GraphicClass::SingleWithMask;
                graphic.texture_path = rule.replacement_texture.clone();
                graphic.color = rule.color;
                graphic.color_two = rule.icon_color;
                graphic.shader = ShaderKind::CutoutComplex;
                graphic.mask_path = Some(resolved.texture_path.clone());
            }
            None => {
                graphic.class = GraphicClass::Single;
                graphic.texture_path = resolved.texture_path.clone();
                graphic.color = resolved.color;
            }
        }

        let rendered = self.hook.init(graphic)?;
        part.ui_icon = Some(rendered.main_texture.clone());
        part.ui_icon_color = Some(resolved.color);
        part.rendered = Some(rendered);
        Ok(())
    }

    /// Apply every resolution to its part in `catalog`. Returns how many
    /// parts were written; resolutions naming unknown parts are skipped.
    pub fn apply_all(
        &mut self,
        catalog: &mut HostCatalog,
        resolutions: &[Resolution],
    ) -> Result<usize, H::Error> {
        let mut applied = 0;
        for resolution in resolutions {
            let Some(part) = catalog.part_mut(&resolution.part) else {
                tracing::debug!("resolved part {} not in catalog, skipping", resolution.part);
                continue;
            };
            self.apply(part, &resolution.resolved)?;
            applied += 1;
        }
        Ok(applied)
    }
}
