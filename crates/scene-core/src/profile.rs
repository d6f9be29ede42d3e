use std::str::FromStr;

// Viewport width thresholds (CSS pixels)
pub const MOBILE_MAX_WIDTH: u32 = 768;
pub const TABLET_MAX_WIDTH: u32 = 1024;

// At or below this core count the device is treated as low-power.
pub const LOW_POWER_CORES: usize = 4;

pub const LOW_POWER_PIXEL_RATIO_CAP: f32 = 1.0;
pub const DEFAULT_PIXEL_RATIO_CAP: f32 = 2.0;

/// Coarse device classification used to scale visual cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceTier {
    Mobile,
    Tablet,
    Desktop,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown device tier `{0}`, expected mobile, tablet or desktop")]
pub struct ParseTierError(String);

impl FromStr for DeviceTier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mobile" => Ok(Self::Mobile),
            "tablet" => Ok(Self::Tablet),
            "desktop" => Ok(Self::Desktop),
            other => Err(ParseTierError(other.to_owned())),
        }
    }
}

impl DeviceTier {
    pub fn classify(viewport_width: u32) -> Self {
        if viewport_width < MOBILE_MAX_WIDTH {
            Self::Mobile
        } else if viewport_width < TABLET_MAX_WIDTH {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }
}

/// Per-tier rendering budget. Computed once at mount and held for the
/// lifetime of the scene; a later resize never re-derives it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceProfile {
    pub tier: DeviceTier,
    pub low_power: bool,
    pub particle_count: usize,
    pub particle_size: f32,
    pub parallax_strength: f32,
    pub max_parallax: f32,
    pub pixel_ratio_cap: f32,
    pub disable_animations: bool,
}

impl DeviceProfile {
    pub fn detect(viewport_width: u32, hardware_concurrency: usize) -> Self {
        let tier = DeviceTier::classify(viewport_width);
        let low_power = hardware_concurrency <= LOW_POWER_CORES;
        let profile = Self::for_tier(tier, low_power);
        log::debug!(
            "device profile: {:?} (low_power={}) -> {} particles",
            tier,
            low_power,
            profile.particle_count
        );
        profile
    }

    pub fn for_tier(tier: DeviceTier, low_power: bool) -> Self {
        let (particle_count, particle_size, parallax_strength, max_parallax) = match tier {
            DeviceTier::Mobile => (40, 0.05, 0.2, 30.0),
            DeviceTier::Tablet => (70, 0.06, 0.35, 50.0),
            DeviceTier::Desktop => (120, 0.07, 0.5, 80.0),
        };
        Self {
            tier,
            low_power,
            particle_count,
            particle_size,
            parallax_strength,
            max_parallax,
            pixel_ratio_cap: if low_power {
                LOW_POWER_PIXEL_RATIO_CAP
            } else {
                DEFAULT_PIXEL_RATIO_CAP
            },
            disable_animations: low_power && tier == DeviceTier::Mobile,
        }
    }
}
