use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A pokemon saved to the wishlist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonEntry {
    pub id: u32,
    pub name: String,
    pub image: String,
    pub types: Vec<String>,
    /// Decimetres.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    pub is_captured: bool,
    pub date_added: DateTime<Utc>,
}

impl PokemonEntry {
    /// Same entry with the capture flag flipped.
    pub fn toggled(&self) -> Self {
        Self {
            is_captured: !self.is_captured,
            ..self.clone()
        }
    }

    pub fn height_m(&self) -> f32 {
        self.height as f32 / 10.0
    }

    pub fn weight_kg(&self) -> f32 {
        self.weight as f32 / 10.0
    }

    pub fn type_label(&self) -> String {
        self.types.join("/")
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PokemonApiResponse {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub sprites: Option<SpriteSet>,
    pub types: Option<Vec<PokemonTypeSlot>>,
    pub height: Option<u32>,
    pub weight: Option<u32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SpriteSet {
    pub front_default: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PokemonTypeSlot {
    #[serde(rename = "type")]
    pub type_info: Option<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NamedResource {
    pub name: Option<String>,
}

pub fn normalize(record: PokemonApiResponse) -> Result<PokemonEntry, Error> {
    normalize_at(record, Utc::now())
}

pub fn normalize_at(
    record: PokemonApiResponse,
    date_added: DateTime<Utc>,
) -> Result<PokemonEntry, Error> {
    let id = record.id.ok_or_else(|| missing("id"))?;
    let name = record.name.ok_or_else(|| missing("name"))?;
    let image = record
        .sprites
        .and_then(|sprites| sprites.front_default)
        .ok_or_else(|| missing("sprites.front_default"))?;
    let types = record
        .types
        .ok_or_else(|| missing("types"))?
        .into_iter()
        .map(|slot| {
            slot.type_info
                .and_then(|info| info.name)
                .ok_or_else(|| missing("types[].type.name"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let height = record.height.ok_or_else(|| missing("height"))?;
    let weight = record.weight.ok_or_else(|| missing("weight"))?;

    Ok(PokemonEntry {
        id,
        name,
        image,
        types,
        height,
        weight,
        is_captured: false,
        date_added,
    })
}

fn missing(field: &str) -> Error {
    Error::MalformedResponse(field.to_string())
}
