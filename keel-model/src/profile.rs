//! Profile name fields as held locally and as stored remotely.

/// Column list selected when reading a profile row.
pub const PROFILE_COLUMNS: &str = "first_name,middle_name,last_name";

/// Editable name fields of a user profile.
///
/// Always holds concrete strings; missing remote values are normalized to
/// the empty string when a [`ProfileRecord`] is converted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileFields {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
}

impl ProfileFields {
    pub fn new(
        first_name: impl Into<String>,
        middle_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            middle_name: middle_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Overwrite a single field, leaving the other two untouched.
    pub fn set(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::FirstName => self.first_name = value,
            ProfileField::MiddleName => self.middle_name = value,
            ProfileField::LastName => self.last_name = value,
        }
    }

    pub fn clear(&mut self) {
        self.first_name.clear();
        self.middle_name.clear();
        self.last_name.clear();
    }
}

/// A profile row exactly as the remote store returns it.
///
/// Every column is nullable on the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileRecord {
    #[cfg_attr(feature = "serde", serde(default))]
    pub first_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub middle_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub last_name: Option<String>,
}

impl From<ProfileRecord> for ProfileFields {
    fn from(record: ProfileRecord) -> Self {
        Self {
            first_name: record.first_name.unwrap_or_default(),
            middle_name: record.middle_name.unwrap_or_default(),
            last_name: record.last_name.unwrap_or_default(),
        }
    }
}

/// One of the three editable name fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    FirstName,
    MiddleName,
    LastName,
}

/// One of the two password-change inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordField {
    NewPassword,
    ConfirmNewPassword,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_null_record_normalizes_to_empty_strings() {
        let fields = ProfileFields::from(ProfileRecord::default());
        assert_eq!(fields, ProfileFields::new("", "", ""));
    }

    #[test]
    fn partial_record_keeps_present_values() {
        let record = ProfileRecord {
            first_name: Some("A".into()),
            middle_name: None,
            last_name: Some("C".into()),
        };
        assert_eq!(ProfileFields::from(record), ProfileFields::new("A", "", "C"));
    }

    #[test]
    fn set_touches_only_the_named_field() {
        let mut fields = ProfileFields::new("Ada", "King", "Lovelace");
        fields.set(ProfileField::MiddleName, "Augusta".into());
        assert_eq!(fields, ProfileFields::new("Ada", "Augusta", "Lovelace"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn record_deserializes_nulls_and_missing_columns() {
        let record: ProfileRecord = serde_json::from_str(
            r#"{"first_name":"A","middle_name":null}"#,
        )
        .unwrap();
        assert_eq!(record.first_name.as_deref(), Some("A"));
        assert_eq!(record.middle_name, None);
        assert_eq!(record.last_name, None);
    }
}
