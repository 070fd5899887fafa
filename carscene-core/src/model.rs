//! Identifiers of the models drawn by the scenes.

/// A model loaded from the models directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelId {
    Frame,
    Wheel,
    Blinker,
    Light,
    Pine,
    Streetlight,
    Grass,
    Street,
    StreetCorner,
}

impl ModelId {
    pub const ALL: [ModelId; 9] = [
        ModelId::Frame,
        ModelId::Wheel,
        ModelId::Blinker,
        ModelId::Light,
        ModelId::Pine,
        ModelId::Streetlight,
        ModelId::Grass,
        ModelId::Street,
        ModelId::StreetCorner,
    ];

    /// Name of the PLY file holding the model.
    pub fn file_name(self) -> &'static str {
        match self {
            ModelId::Frame => "frame.ply",
            ModelId::Wheel => "wheel.ply",
            ModelId::Blinker => "blinker.ply",
            ModelId::Light => "light.ply",
            ModelId::Pine => "pine.ply",
            ModelId::Streetlight => "streetlight.ply",
            ModelId::Grass => "grass.ply",
            ModelId::Street => "street.ply",
            ModelId::StreetCorner => "streetcorner.ply",
        }
    }

    /// Models whose back faces must be drawn too, like the flat pine branches.
    pub fn double_sided(self) -> bool {
        matches!(self, ModelId::Pine)
    }
}
