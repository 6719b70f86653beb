use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type MemberId = u64;
pub type EventId = u64;
pub type PhotoId = u64;
pub type ArticleId = u64;
pub type ContactId = u64;
pub type MessageId = u64;

/// Contact details attached to a family member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberContact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Represents a member of the family tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: MemberId,
    pub name: String,
    pub birth_date: NaiveDate,
    pub death_date: Option<NaiveDate>,
    /// Free-text label such as "Père" or "Petite-fille"
    pub role: String,
    /// Informational grouping, 1 for the eldest generation
    pub generation: u8,
    pub parent_id: Option<MemberId>,
    pub spouse_id: Option<MemberId>,
    #[serde(default)]
    pub children_ids: Vec<MemberId>,
    pub photo: Option<String>,
    pub bio: Option<String>,
    pub contact: Option<MemberContact>,
}

/// Payload for adding a member; the store assigns the id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMember {
    pub name: String,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub death_date: Option<NaiveDate>,
    pub role: String,
    pub generation: u8,
    #[serde(default)]
    pub parent_id: Option<MemberId>,
    #[serde(default)]
    pub spouse_id: Option<MemberId>,
    #[serde(default)]
    pub children_ids: Vec<MemberId>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub contact: Option<MemberContact>,
}

impl NewMember {
    pub fn new(name: impl Into<String>, birth_date: NaiveDate, role: impl Into<String>, generation: u8) -> Self {
        Self {
            name: name.into(),
            birth_date,
            death_date: None,
            role: role.into(),
            generation,
            parent_id: None,
            spouse_id: None,
            children_ids: Vec::new(),
            photo: None,
            bio: None,
            contact: None,
        }
    }
}

/// Partial update for a member.
///
/// Optional fields use `Option<Option<T>>`: `None` leaves the field alone,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberPatch {
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<Option<NaiveDate>>,
    pub role: Option<String>,
    pub generation: Option<u8>,
    pub parent_id: Option<Option<MemberId>>,
    pub spouse_id: Option<Option<MemberId>>,
    pub children_ids: Option<Vec<MemberId>>,
    pub photo: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub contact: Option<Option<MemberContact>>,
}

/// Fields of the add/edit member dialog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberForm {
    pub name: String,
    pub birth_date: NaiveDate,
    pub role: String,
    pub photo: Option<String>,
    pub bio: Option<String>,
    pub parent_id: Option<MemberId>,
    pub spouse_id: Option<MemberId>,
}

impl MemberForm {
    pub fn into_new_member(self, generation: u8) -> NewMember {
        NewMember {
            photo: self.photo,
            bio: self.bio,
            parent_id: self.parent_id,
            spouse_id: self.spouse_id,
            ..NewMember::new(self.name, self.birth_date, self.role, generation)
        }
    }

    pub fn into_patch(self) -> MemberPatch {
        MemberPatch {
            name: Some(self.name),
            birth_date: Some(self.birth_date),
            role: Some(self.role),
            photo: Some(self.photo),
            bio: Some(self.bio),
            parent_id: Some(self.parent_id),
            spouse_id: Some(self.spouse_id),
            ..MemberPatch::default()
        }
    }
}

/// Kind of calendar event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Birthday,
    Wedding,
    Family,
    Other,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventType::Birthday => "birthday",
            EventType::Wedding => "wedding",
            EventType::Family => "family",
            EventType::Other => "other",
        };
        f.write_str(label)
    }
}

/// A family calendar event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub date: NaiveDate,
    pub event_type: EventType,
    /// Soft reference, never checked against the member store
    pub member_id: Option<MemberId>,
    pub description: String,
    /// Advisory only, no recurrence expansion happens
    pub recurring: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub date: NaiveDate,
    pub event_type: EventType,
    #[serde(default)]
    pub member_id: Option<MemberId>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub recurring: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub event_type: Option<EventType>,
    pub member_id: Option<Option<MemberId>>,
    pub description: Option<String>,
    pub recurring: Option<bool>,
}

/// A photo in the family gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub thumbnail_url: String,
    pub upload_date: NaiveDate,
    pub uploaded_by: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Open-ended category such as "family" or "birthday"
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPhoto {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_url: String,
    #[serde(default)]
    pub thumbnail_url: String,
    /// Defaults to today when absent
    #[serde(default)]
    pub upload_date: Option<NaiveDate>,
    #[serde(default)]
    pub uploaded_by: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub upload_date: Option<NaiveDate>,
    pub uploaded_by: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
}

/// A news article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub publish_date: NaiveDate,
    pub image_url: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Display string, e.g. "3 min"
    pub read_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    /// Defaults to today when absent
    #[serde(default)]
    pub publish_date: Option<NaiveDate>,
    #[serde(default)]
    pub image_url: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub read_time: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticlePatch {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub publish_date: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub read_time: Option<String>,
}

/// Entry of the family contact directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub role: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Part of the emergency contacts subset
    pub emergency: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub emergency: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub emergency: Option<bool>,
}

/// Fields submitted through the contact form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// Identifies a single contact form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Subject,
    Message,
}

impl FormField {
    /// Whether the form refuses to submit while this field is blank
    pub fn is_required(self) -> bool {
        !matches!(self, FormField::Phone)
    }
}

/// Validation errors for the contact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormFieldError {
    Missing(FormField),
    InvalidEmail,
}

/// Lifecycle of a contact form submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

/// An outbound message recorded from a contact form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub form: ContactFormData,
}

/// Category selection for the gallery and news listings.
///
/// Persisted as a nullable string: `null` means every category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Interpret a UI category id, where "all" (or an empty id) selects everything
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    pub fn only(category: impl Into<String>) -> Self {
        CategoryFilter::Only(category.into())
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }
}

impl From<Option<String>> for CategoryFilter {
    fn from(value: Option<String>) -> Self {
        value.map_or(CategoryFilter::All, CategoryFilter::Only)
    }
}

impl From<CategoryFilter> for Option<String> {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => None,
            CategoryFilter::Only(category) => Some(category),
        }
    }
}

/// Number of entries carrying a category, for filter bars
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Persisted part of the family store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyStoreState {
    pub members: Vec<FamilyMember>,
    #[serde(default)]
    pub dark_mode: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventsStoreState {
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryStoreState {
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub selected_category: CategoryFilter,
    #[serde(default)]
    pub lightbox_open: bool,
    #[serde(default)]
    pub current_photo_index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsStoreState {
    pub articles: Vec<Article>,
    #[serde(default)]
    pub selected_category: CategoryFilter,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactStoreState {
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_filter_parse() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("ALL"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("birthday"), CategoryFilter::only("birthday"));
    }

    #[test]
    fn test_category_filter_matches() {
        assert!(CategoryFilter::All.matches("anything"));
        assert!(CategoryFilter::only("wedding").matches("wedding"));
        assert!(!CategoryFilter::only("wedding").matches("Wedding"));
    }

    #[test]
    fn test_category_filter_persists_as_nullable_string() {
        let state = NewsStoreState {
            articles: Vec::new(),
            selected_category: CategoryFilter::All,
        };
        let json = serde_json::to_value(&state).unwrap();
        assert!(json["selected_category"].is_null());

        let state = NewsStoreState {
            articles: Vec::new(),
            selected_category: CategoryFilter::only("recette"),
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"selected_category\":\"recette\""));
        let back: NewsStoreState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.selected_category, CategoryFilter::only("recette"));
    }

    #[test]
    fn test_event_type_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&EventType::Birthday).unwrap(), "\"birthday\"");
        let parsed: EventType = serde_json::from_str("\"wedding\"").unwrap();
        assert_eq!(parsed, EventType::Wedding);
        assert_eq!(EventType::Family.to_string(), "family");
    }

    #[test]
    fn test_message_flattens_form_fields() {
        let message = Message {
            id: 7,
            timestamp: Utc::now(),
            form: ContactFormData {
                name: "Lucas".to_string(),
                email: "lucas@example.com".to_string(),
                phone: String::new(),
                subject: "Salut".to_string(),
                message: "Bonjour".to_string(),
            },
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["subject"], "Salut");
        assert_eq!(json["id"], 7);
    }

    #[test]
    fn test_new_member_defaults_children_when_absent() {
        let json = r#"{"name":"Léa","birth_date":"2010-03-10","role":"Petite-fille","generation":3}"#;
        let member: NewMember = serde_json::from_str(json).unwrap();
        assert!(member.children_ids.is_empty());
        assert_eq!(member.parent_id, None);
    }

    #[test]
    fn test_member_form_into_patch_touches_form_fields_only() {
        let form = MemberForm {
            name: "Emma".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2008, 6, 20).unwrap(),
            role: "Petite-fille".to_string(),
            photo: None,
            bio: Some("Danse".to_string()),
            parent_id: Some(3),
            spouse_id: None,
        };
        let patch = form.into_patch();
        assert_eq!(patch.generation, None);
        assert_eq!(patch.children_ids, None);
        assert_eq!(patch.parent_id, Some(Some(3)));
        assert_eq!(patch.spouse_id, Some(None));
    }

    #[test]
    fn test_phone_is_the_only_optional_form_field() {
        assert!(FormField::Name.is_required());
        assert!(FormField::Email.is_required());
        assert!(!FormField::Phone.is_required());
        assert!(FormField::Subject.is_required());
        assert!(FormField::Message.is_required());
    }
}
