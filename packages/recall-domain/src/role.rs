use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Who authored a conversation message.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	User,
	Assistant,
}
impl Role {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::User => "user",
			Self::Assistant => "assistant",
		}
	}
}
impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for Role {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"user" => Ok(Self::User),
			"assistant" => Ok(Self::Assistant),
			other => Err(Error::UnknownRole { role: other.to_string() }),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trips_known_roles() {
		assert_eq!("user".parse::<Role>().unwrap(), Role::User);
		assert_eq!("assistant".parse::<Role>().unwrap(), Role::Assistant);
		assert_eq!(Role::Assistant.as_str(), "assistant");
	}

	#[test]
	fn rejects_unknown_role() {
		assert!("system".parse::<Role>().is_err());
	}
}
