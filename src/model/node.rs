//! Node in the movie graph.

use serde::{Deserialize, Serialize};
use super::{Demographics, Gender, PropertyMap, Race, Value};

/// Opaque node identifier. Assigned contiguously from 0 at first creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four node types of the tripartite graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKind {
    Movie,
    Actor,
    Director,
    ActorDirector,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Movie => "MOVIE",
            NodeKind::Actor => "ACTOR",
            NodeKind::Director => "DIRECTOR",
            NodeKind::ActorDirector => "ACTOR-DIRECTOR",
        }
    }

    /// Actors and actor-directors.
    pub fn acts(self) -> bool {
        matches!(self, NodeKind::Actor | NodeKind::ActorDirector)
    }

    /// Directors and actor-directors.
    pub fn directs(self) -> bool {
        matches!(self, NodeKind::Director | NodeKind::ActorDirector)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a person does in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Actor,
    Director,
    ActorDirector,
}

impl Role {
    /// Role after this person is additionally credited as an actor.
    pub fn with_acting(self) -> Role {
        match self {
            Role::Director => Role::ActorDirector,
            other => other,
        }
    }

    /// Role after this person is additionally credited as a director.
    pub fn with_directing(self) -> Role {
        match self {
            Role::Actor => Role::ActorDirector,
            other => other,
        }
    }

    pub fn kind(self) -> NodeKind {
        match self {
            Role::Actor => NodeKind::Actor,
            Role::Director => NodeKind::Director,
            Role::ActorDirector => NodeKind::ActorDirector,
        }
    }
}

/// Attributes of an actor, director or actor-director.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonAttributes {
    pub name: String,
    pub role: Role,
    pub race: Race,
    pub gender: Gender,
}

impl PersonAttributes {
    pub fn new(name: impl Into<String>, role: Role, demographics: Demographics) -> Self {
        Self {
            name: name.into(),
            role,
            race: demographics.race,
            gender: demographics.gender,
        }
    }

    pub fn demographics(&self) -> Demographics {
        Demographics::new(self.race, self.gender)
    }
}

/// Attributes of a movie. Everything the analyses do not read lives in `extras`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieAttributes {
    pub title: String,
    pub release_year: i32,
    pub gross: i64,
    pub budget: i64,
    pub director_name: String,
    pub actor_names: Vec<String>,
    pub extras: PropertyMap,
}

impl MovieAttributes {
    pub fn new(title: impl Into<String>, release_year: i32) -> Self {
        Self {
            title: title.into(),
            release_year,
            gross: 0,
            budget: 0,
            director_name: String::new(),
            actor_names: Vec::new(),
            extras: PropertyMap::new(),
        }
    }

    /// Title concatenated with release year, so remakes stay distinct.
    pub fn unique_id(&self) -> String {
        unique_movie_id(&self.title, self.release_year)
    }

    /// gross / budget, undefined when the budget is zero.
    pub fn profit_ratio(&self) -> Option<f64> {
        if self.budget == 0 {
            None
        } else {
            Some(self.gross as f64 / self.budget as f64)
        }
    }
}

/// Index key of a movie: `"Avatar2009"`.
pub fn unique_movie_id(title: &str, release_year: i32) -> String {
    format!("{title}{release_year}")
}

/// Per-node payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeAttributes {
    Movie(MovieAttributes),
    Person(PersonAttributes),
}

/// A node in the movie graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub attributes: NodeAttributes,
}

impl Node {
    pub fn new(id: NodeId, attributes: NodeAttributes) -> Self {
        Self { id, attributes }
    }

    pub fn kind(&self) -> NodeKind {
        match &self.attributes {
            NodeAttributes::Movie(_) => NodeKind::Movie,
            NodeAttributes::Person(p) => p.role.kind(),
        }
    }

    pub fn as_movie(&self) -> Option<&MovieAttributes> {
        match &self.attributes {
            NodeAttributes::Movie(m) => Some(m),
            NodeAttributes::Person(_) => None,
        }
    }

    pub fn as_person(&self) -> Option<&PersonAttributes> {
        match &self.attributes {
            NodeAttributes::Person(p) => Some(p),
            NodeAttributes::Movie(_) => None,
        }
    }

    pub fn as_person_mut(&mut self) -> Option<&mut PersonAttributes> {
        match &mut self.attributes {
            NodeAttributes::Person(p) => Some(p),
            NodeAttributes::Movie(_) => None,
        }
    }

    /// The NameIndex key: person name, or movie unique id.
    pub fn index_key(&self) -> String {
        match &self.attributes {
            NodeAttributes::Movie(m) => m.unique_id(),
            NodeAttributes::Person(p) => p.name.clone(),
        }
    }

    /// Flatten into the string-keyed scalar mapping used by persistence.
    pub fn to_properties(&self) -> PropertyMap {
        let mut props = PropertyMap::new();
        props.insert("type".into(), Value::from(self.kind().as_str()));
        match &self.attributes {
            NodeAttributes::Movie(m) => {
                props.extend(m.extras.iter().map(|(k, v)| (k.clone(), v.clone())));
                props.insert("title".into(), Value::from(m.title.as_str()));
                props.insert("releaseYear".into(), Value::from(m.release_year));
                props.insert("gross".into(), Value::from(m.gross));
                props.insert("budget".into(), Value::from(m.budget));
                props.insert("directorName".into(), Value::from(m.director_name.as_str()));
                props.insert("actorNames".into(), Value::from(m.actor_names.clone()));
            }
            NodeAttributes::Person(p) => {
                props.insert("name".into(), Value::from(p.name.as_str()));
                props.insert("race".into(), demographic_value(p.race.is_known(), p.race.as_str()));
                props.insert("gender".into(), demographic_value(p.gender.is_known(), p.gender.as_str()));
            }
        }
        props
    }
}

fn demographic_value(known: bool, label: &str) -> Value {
    if known { Value::from(label) } else { Value::Null }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_promotion_is_idempotent() {
        assert_eq!(Role::Director.with_acting(), Role::ActorDirector);
        assert_eq!(Role::Actor.with_directing(), Role::ActorDirector);
        assert_eq!(Role::ActorDirector.with_acting().with_directing(), Role::ActorDirector);
        assert_eq!(Role::Actor.with_acting(), Role::Actor);
    }

    #[test]
    fn test_unique_id_distinguishes_remakes() {
        let a = MovieAttributes::new("King Kong", 1976);
        let b = MovieAttributes::new("King Kong", 2005);
        assert_eq!(a.unique_id(), "King Kong1976");
        assert_ne!(a.unique_id(), b.unique_id());
    }

    #[test]
    fn test_profit_ratio_undefined_for_zero_budget() {
        let mut m = MovieAttributes::new("Avatar", 2009);
        m.gross = 1_000_000;
        assert_eq!(m.profit_ratio(), None);
        m.budget = 500_000;
        assert_eq!(m.profit_ratio(), Some(2.0));
    }

    #[test]
    fn test_person_to_properties() {
        let person = PersonAttributes::new(
            "Tom Hanks",
            Role::ActorDirector,
            Demographics::new(Race::White, Gender::Unknown),
        );
        let node = Node::new(NodeId(4), NodeAttributes::Person(person));
        let props = node.to_properties();
        assert_eq!(props.get("type"), Some(&Value::from("ACTOR-DIRECTOR")));
        assert_eq!(props.get("race"), Some(&Value::from("White")));
        assert_eq!(props.get("gender"), Some(&Value::Null));
    }

    #[test]
    fn test_movie_to_properties_keeps_extras() {
        let mut m = MovieAttributes::new("Avatar", 2009);
        m.extras.insert("genres".into(), Value::from(vec!["Action", "Sci-Fi"]));
        let node = Node::new(NodeId(0), NodeAttributes::Movie(m));
        let props = node.to_properties();
        assert_eq!(props.get("releaseYear"), Some(&Value::Int(2009)));
        assert_eq!(props.get("genres"), Some(&Value::from(vec!["Action", "Sci-Fi"])));
    }
}
