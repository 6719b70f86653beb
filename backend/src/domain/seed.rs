//! Initial content used when a store has never been persisted.

use chrono::NaiveDate;
use shared::{
    Article, Contact, ContactStoreState, Event, EventType, EventsStoreState, FamilyMember,
    FamilyStoreState, GalleryStoreState, MemberContact, NewsStoreState, Photo,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

struct MemberSeed {
    id: u64,
    name: &'static str,
    birth: (i32, u32, u32),
    role: &'static str,
    generation: u8,
    parent_id: Option<u64>,
    spouse_id: Option<u64>,
    children_ids: &'static [u64],
    slug: &'static str,
    bio: &'static str,
    phone: &'static str,
    address: &'static str,
}

impl MemberSeed {
    fn build(self) -> FamilyMember {
        let (year, month, day) = self.birth;
        FamilyMember {
            id: self.id,
            name: self.name.to_string(),
            birth_date: date(year, month, day),
            death_date: None,
            role: self.role.to_string(),
            generation: self.generation,
            parent_id: self.parent_id,
            spouse_id: self.spouse_id,
            children_ids: self.children_ids.to_vec(),
            photo: Some(format!("/images/members/{}.jpg", self.slug)),
            bio: Some(self.bio.to_string()),
            contact: Some(MemberContact {
                email: Some(format!("{}@email.com", self.slug.replace('-', "."))),
                phone: Some(self.phone.to_string()),
                address: Some(self.address.to_string()),
            }),
        }
    }
}

const PAIX: &str = "123 Rue de la Paix, 75001 Paris";
const CHAMPS: &str = "456 Avenue des Champs, 75008 Paris";
const SAINT_GERMAIN: &str = "789 Boulevard Saint-Germain, 75006 Paris";

pub fn family_state() -> FamilyStoreState {
    let seeds = vec![
        MemberSeed {
            id: 1,
            name: "Jean Dupont",
            birth: (1950, 3, 15),
            role: "Père",
            generation: 1,
            parent_id: None,
            spouse_id: Some(2),
            children_ids: &[3, 4],
            slug: "jean-dupont",
            bio: "Fondateur de la famille, entrepreneur dans le domaine de la construction.",
            phone: "+33 1 23 45 67 89",
            address: PAIX,
        },
        MemberSeed {
            id: 2,
            name: "Marie Dupont",
            birth: (1952, 7, 22),
            role: "Mère",
            generation: 1,
            parent_id: None,
            spouse_id: Some(1),
            children_ids: &[3, 4],
            slug: "marie-dupont",
            bio: "Infirmière à la retraite, passionnée de jardinage et de cuisine.",
            phone: "+33 1 23 45 67 90",
            address: PAIX,
        },
        MemberSeed {
            id: 3,
            name: "Pierre Dupont",
            birth: (1975, 11, 8),
            role: "Fils",
            generation: 2,
            parent_id: Some(1),
            spouse_id: Some(5),
            children_ids: &[6, 7],
            slug: "pierre-dupont",
            bio: "Ingénieur informatique, passionné de technologie et de sport.",
            phone: "+33 1 23 45 67 91",
            address: CHAMPS,
        },
        MemberSeed {
            id: 4,
            name: "Sophie Dupont",
            birth: (1978, 4, 12),
            role: "Fille",
            generation: 2,
            parent_id: Some(1),
            spouse_id: Some(8),
            children_ids: &[9],
            slug: "sophie-dupont",
            bio: "Architecte, créative et amoureuse de l'art contemporain.",
            phone: "+33 1 23 45 67 92",
            address: SAINT_GERMAIN,
        },
        MemberSeed {
            id: 5,
            name: "Claire Martin",
            birth: (1976, 9, 30),
            role: "Belle-fille",
            generation: 2,
            parent_id: None,
            spouse_id: Some(3),
            children_ids: &[6, 7],
            slug: "claire-martin",
            bio: "Professeure de français, passionnée de littérature et de voyage.",
            phone: "+33 1 23 45 67 93",
            address: CHAMPS,
        },
        MemberSeed {
            id: 6,
            name: "Lucas Dupont",
            birth: (2005, 1, 15),
            role: "Petit-fils",
            generation: 3,
            parent_id: Some(3),
            spouse_id: None,
            children_ids: &[],
            slug: "lucas-dupont",
            bio: "Étudiant en terminale, passionné de musique et de cinéma.",
            phone: "+33 6 12 34 56 78",
            address: CHAMPS,
        },
        MemberSeed {
            id: 7,
            name: "Emma Dupont",
            birth: (2008, 6, 20),
            role: "Petite-fille",
            generation: 3,
            parent_id: Some(3),
            spouse_id: None,
            children_ids: &[],
            slug: "emma-dupont",
            bio: "Collégienne, passionnée de danse et de dessin.",
            phone: "+33 6 12 34 56 79",
            address: CHAMPS,
        },
        MemberSeed {
            id: 8,
            name: "Thomas Leroy",
            birth: (1975, 12, 3),
            role: "Beau-fils",
            generation: 2,
            parent_id: None,
            spouse_id: Some(4),
            children_ids: &[9],
            slug: "thomas-leroy",
            bio: "Chef cuisinier, créatif et amoureux de la gastronomie française.",
            phone: "+33 1 23 45 67 94",
            address: SAINT_GERMAIN,
        },
        MemberSeed {
            id: 9,
            name: "Léa Leroy",
            birth: (2010, 3, 10),
            role: "Petite-fille",
            generation: 3,
            parent_id: Some(4),
            spouse_id: None,
            children_ids: &[],
            slug: "lea-leroy",
            bio: "Écolière, curieuse et passionnée de sciences naturelles.",
            phone: "+33 6 12 34 56 80",
            address: SAINT_GERMAIN,
        },
    ];

    FamilyStoreState {
        members: seeds.into_iter().map(MemberSeed::build).collect(),
        dark_mode: false,
    }
}

pub fn events_state() -> EventsStoreState {
    let event = |id, title: &str, when: NaiveDate, event_type, member_id, description: &str, recurring| Event {
        id,
        title: title.to_string(),
        date: when,
        event_type,
        member_id,
        description: description.to_string(),
        recurring,
    };

    EventsStoreState {
        events: vec![
            event(1, "Anniversaire de Jean", date(2024, 3, 15), EventType::Birthday, Some(1),
                "Anniversaire de Jean Dupont - 74 ans", true),
            event(2, "Réunion familiale", date(2024, 6, 20), EventType::Family, None,
                "Réunion familiale annuelle au domaine familial", true),
            event(3, "Anniversaire de Marie", date(2024, 7, 22), EventType::Birthday, Some(2),
                "Anniversaire de Marie Dupont - 72 ans", true),
            event(4, "Mariage de Lucas", date(2024, 9, 15), EventType::Wedding, Some(6),
                "Mariage de Lucas avec sa fiancée", false),
            event(5, "Anniversaire de Pierre", date(2024, 11, 8), EventType::Birthday, Some(3),
                "Anniversaire de Pierre Dupont - 49 ans", true),
        ],
    }
}

pub fn gallery_state() -> GalleryStoreState {
    let photo = |id, title: &str, description: &str, slug: &str, uploaded: NaiveDate, by: &str, photo_tags: &[&str], category: &str| Photo {
        id,
        title: title.to_string(),
        description: description.to_string(),
        image_url: format!("/images/gallery/{}.jpg", slug),
        thumbnail_url: format!("/images/gallery/thumbs/{}.jpg", slug),
        upload_date: uploaded,
        uploaded_by: by.to_string(),
        tags: tags(photo_tags),
        category: category.to_string(),
    };

    GalleryStoreState {
        photos: vec![
            photo(1, "Réunion familiale 2023", "Toute la famille réunie pour les fêtes de fin d'année",
                "family-reunion-2023", date(2023, 12, 25), "Pierre Dupont", &["famille", "réunion", "2023"], "family"),
            photo(2, "Anniversaire de Jean", "Célébration des 73 ans de Jean",
                "jean-birthday-2023", date(2023, 3, 15), "Marie Dupont", &["anniversaire", "jean", "2023"], "birthday"),
            photo(3, "Vacances d'été", "Séjour en Bretagne avec les enfants",
                "summer-vacation-2023", date(2023, 8, 15), "Sophie Dupont", &["vacances", "été", "bretagne"], "vacation"),
            photo(4, "Mariage de Pierre et Claire", "Le grand jour de Pierre et Claire",
                "pierre-claire-wedding", date(2010, 6, 12), "Jean Dupont", &["mariage", "pierre", "claire"], "wedding"),
            photo(5, "Naissance d'Emma", "Les premiers jours d'Emma",
                "emma-birth", date(2008, 6, 20), "Claire Martin", &["naissance", "emma", "bébé"], "birth"),
            photo(6, "Noël en famille", "Célébration de Noël 2022",
                "christmas-2022", date(2022, 12, 25), "Marie Dupont", &["noël", "famille", "2022"], "holiday"),
        ],
        ..GalleryStoreState::default()
    }
}

pub fn news_state() -> NewsStoreState {
    let article = |id, title: &str, excerpt: &str, content: &str, author: &str, published: NaiveDate, slug: &str, category: &str, article_tags: &[&str], read_time: &str| Article {
        id,
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        content: content.to_string(),
        author: author.to_string(),
        publish_date: published,
        image_url: format!("/images/news/{}.jpg", slug),
        category: category.to_string(),
        tags: tags(article_tags),
        read_time: read_time.to_string(),
    };

    NewsStoreState {
        articles: vec![
            article(
                1,
                "Nouvelle naissance dans la famille !",
                "Nous sommes ravis d'annoncer la naissance de notre nouveau petit cousin...",
                "Nous sommes ravis d'annoncer la naissance de notre nouveau petit cousin, né le 15 mars 2024. \
                 Maman et bébé se portent à merveille. Toute la famille est en liesse et nous attendons avec \
                 impatience de pouvoir le rencontrer...",
                "Marie Dupont",
                date(2024, 3, 16),
                "new-baby-2024",
                "naissance",
                &["naissance", "famille", "nouveau-né"],
                "3 min",
            ),
            article(
                2,
                "Réunion familiale de printemps",
                "Notre traditionnelle réunion de printemps s'est déroulée dans la joie et la bonne humeur...",
                "Notre traditionnelle réunion de printemps s'est déroulée dans la joie et la bonne humeur. \
                 Nous étions tous réunis au domaine familial pour partager un moment convivial. Au programme : \
                 barbecue, jeux pour les enfants, et bien sûr, beaucoup de discussions et de rires...",
                "Pierre Dupont",
                date(2024, 4, 20),
                "spring-reunion-2024",
                "réunion",
                &["réunion", "printemps", "famille"],
                "5 min",
            ),
            article(
                3,
                "Mariage de Lucas prévu pour septembre",
                "Lucas et sa fiancée ont officialisé leur union et nous invitent tous à célébrer...",
                "Lucas et sa fiancée ont officialisé leur union et nous invitent tous à célébrer ce grand jour \
                 le 15 septembre 2024. La cérémonie aura lieu dans le jardin familial, suivi d'une réception \
                 dans la grange rénovée. Nous sommes tous très heureux de cette nouvelle...",
                "Claire Martin",
                date(2024, 5, 10),
                "lucas-wedding-announcement",
                "mariage",
                &["mariage", "lucas", "célébration"],
                "4 min",
            ),
            article(
                4,
                "Nouvelle recette de grand-mère",
                "Marie partage avec nous sa fameuse recette de tarte aux pommes...",
                "Marie partage avec nous sa fameuse recette de tarte aux pommes, transmise de génération en \
                 génération. Cette recette a fait le bonheur de toute la famille pendant des décennies. Les \
                 ingrédients secrets et les techniques particulières sont maintenant documentés pour les \
                 générations futures...",
                "Marie Dupont",
                date(2024, 5, 25),
                "grandma-apple-pie-recipe",
                "recette",
                &["recette", "tradition", "cuisine"],
                "6 min",
            ),
        ],
        ..NewsStoreState::default()
    }
}

pub fn contact_state() -> ContactStoreState {
    let contact = |id, name: &str, role: &str, phone: &str, email: &str, address: &str, emergency| Contact {
        id,
        name: name.to_string(),
        role: role.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        address: address.to_string(),
        emergency,
    };

    ContactStoreState {
        contacts: vec![
            contact(1, "Jean Dupont", "Père", "+33 1 23 45 67 89", "jean.dupont@email.com", PAIX, true),
            contact(2, "Marie Dupont", "Mère", "+33 1 23 45 67 90", "marie.dupont@email.com", PAIX, true),
            contact(3, "Pierre Dupont", "Fils", "+33 1 23 45 67 91", "pierre.dupont@email.com", CHAMPS, false),
            contact(4, "Sophie Dupont", "Fille", "+33 1 23 45 67 92", "sophie.dupont@email.com", SAINT_GERMAIN, false),
        ],
        messages: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_family_is_consistent() {
        let state = family_state();
        assert_eq!(state.members.len(), 9);

        for member in &state.members {
            if let Some(spouse_id) = member.spouse_id {
                let spouse = state.members.iter().find(|m| m.id == spouse_id).unwrap();
                assert_eq!(spouse.spouse_id, Some(member.id), "spouse of {}", member.name);
            }
            if let Some(parent_id) = member.parent_id {
                let parent = state.members.iter().find(|m| m.id == parent_id).unwrap();
                assert!(parent.children_ids.contains(&member.id), "parent of {}", member.name);
            }
        }
    }

    #[test]
    fn test_seed_member_contact_email() {
        let state = family_state();
        let jean = &state.members[0];
        assert_eq!(jean.name, "Jean Dupont");
        assert_eq!(
            jean.contact.as_ref().and_then(|c| c.email.clone()).as_deref(),
            Some("jean.dupont@email.com")
        );
    }

    #[test]
    fn test_seed_collections_sizes() {
        assert_eq!(events_state().events.len(), 5);
        assert_eq!(gallery_state().photos.len(), 6);
        assert_eq!(news_state().articles.len(), 4);
        assert_eq!(contact_state().contacts.len(), 4);
        assert!(contact_state().messages.is_empty());
    }
}
