use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GuildId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleId(pub u64);

impl GuildId {
    /// The `@everyone` role of a guild shares the guild's id.
    pub fn everyone_role(self) -> RoleId {
        RoleId(self.0)
    }
}

/// Snowflakes are accepted both as JSON numbers and as strings, since ids
/// copied from the Discord client exceed what most JSON tooling keeps exact.
impl<'de> Deserialize<'de> for RoleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(id) => Ok(RoleId(id)),
            RawId::Text(id) => id
                .trim()
                .parse()
                .map(RoleId)
                .map_err(serde::de::Error::custom),
        }
    }
}
