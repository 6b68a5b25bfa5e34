use serde::Deserialize;

// A struct representing one tour offering in the catalog. Tours are
// immutable after load; missing optional fields are resolved at render
// time, not here. Unknown fields in the source document are ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Tour {
    // Opaque identifier, unique per catalog load.
    pub id: String,
    // The display title.
    pub name: String,
    // The operator running the tour.
    pub company: String,
    pub description: Option<String>,
    // Short labels, ordered. The first one doubles as the card tag.
    pub tags: Vec<String>,
    // Absence is a distinct state from a price of zero.
    pub price: Option<f64>,
    pub duration_text: Option<String>,
    pub free_cancellation: Option<bool>,
    pub image: Option<String>,
    pub booking_link: Option<String>,
    // Used for ordering only.
    pub quality_score: Option<f64>,
}

impl Tour {
    pub fn quality(&self) -> f64 {
        self.quality_score.unwrap_or(0.0)
    }

    // The space-joined tag line used by the activity matcher.
    pub fn tag_line(&self) -> String {
        self.tags.join(" ")
    }

    // The denormalized text the search matcher runs against: name, company,
    // description and tags, space-joined and lowercased.
    pub fn haystack(&self) -> String {
        let mut text = String::new();
        text.push_str(&self.name);
        text.push(' ');
        text.push_str(&self.company);

        if let Some(description) = &self.description {
            text.push(' ');
            text.push_str(description);
        }

        for tag in &self.tags {
            text.push(' ');
            text.push_str(tag);
        }

        text.to_lowercase()
    }
}
