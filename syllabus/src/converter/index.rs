use crate::collection::CollectionId;
use crate::common::{Direction, FieldPath};
use crate::errors::SyllabusResult;
use crate::index::{Index, IndexField, IndexName};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct IndexJson {
    name: String,
    collection: String,
    fields: Vec<IndexFieldJson>,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct IndexFieldJson {
    #[serde(rename = "type")]
    direction: DirectionJson,
    field: String,
}

#[derive(Serialize, Deserialize, Clone, Copy)]
enum DirectionJson {
    #[serde(rename = "asc")]
    Asc,
    #[serde(rename = "desc")]
    Desc,
}

impl From<DirectionJson> for Direction {
    fn from(direction: DirectionJson) -> Self {
        match direction {
            DirectionJson::Asc => Direction::Ascending,
            DirectionJson::Desc => Direction::Descending,
        }
    }
}

impl From<Direction> for DirectionJson {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Ascending => DirectionJson::Asc,
            Direction::Descending => DirectionJson::Desc,
        }
    }
}

/// Converts index definitions to and from JSON.
///
/// ```json
/// {"name": "by_age", "collection": "users",
///  "fields": [{"type": "desc", "field": "age"}]}
/// ```
///
/// Members may appear in any order. Unknown members and unknown directions
/// fail with an encoding error; invalid identifiers and an empty field list
/// fail with a validation error.
pub struct IndexConverter;

impl IndexConverter {
    pub fn from_json_str(json: &str) -> SyllabusResult<Index> {
        let parsed: IndexJson = serde_json::from_str(json)?;
        IndexConverter::build(parsed)
    }

    pub fn from_json(json: serde_json::Value) -> SyllabusResult<Index> {
        let parsed: IndexJson = serde_json::from_value(json)?;
        IndexConverter::build(parsed)
    }

    pub fn to_json(index: &Index) -> SyllabusResult<serde_json::Value> {
        Ok(serde_json::to_value(IndexConverter::describe(index))?)
    }

    pub fn to_json_string(index: &Index) -> SyllabusResult<String> {
        Ok(serde_json::to_string(&IndexConverter::describe(index))?)
    }

    fn build(parsed: IndexJson) -> SyllabusResult<Index> {
        let fields = parsed
            .fields
            .into_iter()
            .map(|field| Ok(IndexField::new(FieldPath::parse(&field.field)?, field.direction.into())))
            .collect::<SyllabusResult<Vec<_>>>()?;
        Index::new(
            IndexName::new(parsed.name)?,
            CollectionId::new(parsed.collection)?,
            fields,
        )
    }

    fn describe(index: &Index) -> IndexJson {
        IndexJson {
            name: index.name().to_string(),
            collection: index.collection().to_string(),
            fields: index
                .fields()
                .iter()
                .map(|field| IndexFieldJson {
                    direction: field.direction().into(),
                    field: field.path().to_string(),
                })
                .collect(),
        }
    }
}
