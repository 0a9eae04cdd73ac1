use bevy::color::Srgba;

/// Particles generated per mount
pub const STAR_COUNT: usize = 2200;

/// Inner and outer radius of the spherical shell the particles are sampled in
pub const SHELL_INNER_RADIUS: f32 = 60.0;
pub const SHELL_OUTER_RADIUS: f32 = 180.0;

/// Edge length of the procedurally drawn point sprite, in pixels
pub const SPRITE_SIZE: u32 = 64;

/// Gradient stops of the point sprite as (fraction of radius, alpha)
pub const SPRITE_ALPHA_STOPS: [(f32, f32); 3] = [(0.0, 1.0), (0.5, 0.6), (1.0, 0.0)];

/// Edge length of the vignette overlay image, stretched over the window
pub const VIGNETTE_SIZE: u32 = 256;

/// Vignette darkness as (fraction of the centre-to-corner distance, alpha)
pub const VIGNETTE_ALPHA_STOPS: [(f32, f32); 4] = [(0.0, 0.0), (0.45, 0.0), (0.72, 0.55), (1.0, 0.85)];

/// Tint multiplied into the sprite, `#cfeaff`
pub const STAR_COLOR: Srgba = Srgba::rgb(207.0 / 255.0, 234.0 / 255.0, 1.0);

/// Canvas clear colour behind the stars, `#0a0e12`
pub const STARFIELD_BACKGROUND: Srgba = Srgba::rgb(10.0 / 255.0, 14.0 / 255.0, 18.0 / 255.0);

/// Vertical field of view of the starfield camera, in degrees
pub const CAMERA_FOV_DEGREES: f32 = 75.0;

/// Depth the camera starts at and the near end of the scroll zoom
pub const CAMERA_START_DEPTH: f32 = 120.0;

/// How much farther the camera sits once the page is scrolled to the bottom
pub const SCROLL_DEPTH_RANGE: f32 = 60.0;

/// Point size and opacity the material pulse settles at with no pointer
pub const REST_POINT_SIZE: f32 = 1.1;
pub const REST_OPACITY: f32 = 0.9;

/// Frame rate the per-frame ease factors were tuned at
pub const REFERENCE_FPS: f32 = 60.0;
