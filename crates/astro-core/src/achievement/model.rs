//! Achievement catalogue and unlocked-flag set.

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

macro_rules! achievements {
    ($($variant:ident => $title:literal),+ $(,)?) => {
        /// A named milestone that unlocks a badge.
        ///
        /// Each achievement is persisted on the user record as an
        /// `achieved<Name>` boolean.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
        pub enum Achievement {
            $($variant,)+
        }

        impl Achievement {
            /// Every achievement, in catalogue order.
            pub const ALL: &'static [Achievement] = &[$(Achievement::$variant,)+];

            /// Name of the boolean flag on the user record (`achievedRedPlanetVoyager`).
            pub fn flag_name(self) -> &'static str {
                match self {
                    $(Achievement::$variant => concat!("achieved", stringify!($variant)),)+
                }
            }

            /// Title shown on the badge screen.
            pub fn title(self) -> &'static str {
                match self {
                    $(Achievement::$variant => $title,)+
                }
            }
        }
    };
}

achievements! {
    CosmicPioneer => "Cosmic Pioneer",
    AdventurousExplorer => "Adventurous Explorer",
    StellarVoyager => "Stellar Voyager",
    AstroPioneer => "Astro Pioneer",
    CosmicTrailblazer => "Cosmic Trailblazer",
    CelestialNomad => "Celestial Nomad",
    GalacticWayfarer => "Galactic Wayfarer",
    InterstellarVoyager => "Interstellar Voyager",
    StellarCenturion => "Stellar Centurion",
    VoyagerExtraordinaire => "Voyager Extraordinaire",
    RedPlanetVoyager => "Red Planet Voyager",
    MarsRoverMaestro => "Mars Rover Maestro",
    MartianLensMaster => "Martian Lens Master",
    CosmicChronologist => "Cosmic Chronologist",
    CosmicCadet => "Cosmic Cadet",
    StarNavigator => "Star Navigator",
    GalacticSage => "Galactic Sage",
    NovaScholar => "Nova Scholar",
    QuasarVirtuoso => "Quasar Virtuoso",
    SupernovaSavant => "Supernova Savant",
    LightSpeedExplorer => "Light Speed Explorer",
    OdysseyTrailblazer => "Odyssey Trailblazer",
    InfinityVoyager => "Infinity Voyager",
}

impl Achievement {
    /// Looks up an achievement by its flag name.
    pub fn from_flag_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.flag_name() == name)
    }

    /// Narrative shown when the badge is awarded, addressed to the commander.
    pub fn narrative(self, commander: &str) -> String {
        match self {
            Achievement::RedPlanetVoyager => format!(
                "Congratulations, Commander {commander}! You've earned the esteemed 'Red Planet Voyager' badge, \
                 marking your exploration of captivating Martian landscapes captured by our intrepid rovers. \
                 Like a cosmic explorer gazing upon the Martian frontier, you've delved into the mysteries of \
                 the Red Planet. May your curiosity continue to propel you across the vast reaches of our \
                 celestial neighbor. Onward, Red Planet Voyager!"
            ),
            other => format!(
                "Congratulations, Commander {commander}! You've earned the '{}' badge. Onward, {}!",
                other.title(),
                other.title()
            ),
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag_name())
    }
}

/// The set of achievements a user has unlocked.
///
/// Serialized as one `achievedXxx: bool` entry per catalogue achievement so it
/// can be flattened into the user record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AchievementFlags(BTreeSet<Achievement>);

impl AchievementFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.0.contains(&achievement)
    }

    /// Sets the flag to the given value.
    pub fn set(&mut self, achievement: Achievement, unlocked: bool) {
        if unlocked {
            self.0.insert(achievement);
        } else {
            self.0.remove(&achievement);
        }
    }

    pub fn unlocked(&self) -> impl Iterator<Item = Achievement> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Achievement> for AchievementFlags {
    fn from_iter<I: IntoIterator<Item = Achievement>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for AchievementFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Achievement::ALL.len()))?;
        for achievement in Achievement::ALL {
            map.serialize_entry(achievement.flag_name(), &self.is_unlocked(*achievement))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AchievementFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FlagsVisitor;

        impl<'de> Visitor<'de> for FlagsVisitor {
            type Value = AchievementFlags;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of achievement flags")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut flags = AchievementFlags::new();
                while let Some(key) = access.next_key::<String>()? {
                    match Achievement::from_flag_name(&key) {
                        Some(achievement) => {
                            // null counts as locked
                            let value: Option<bool> = access.next_value()?;
                            flags.set(achievement, value.unwrap_or(false));
                        }
                        None => {
                            access.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(flags)
            }
        }

        deserializer.deserialize_map(FlagsVisitor)
    }
}
