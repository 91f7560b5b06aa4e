//! JSON form of a metadata payload

use {
    anyhow::Context as _,
    creator_metadata::state::{Collection, Creator, MetadataData, UseMethod, Uses},
    serde::Deserialize,
    solana_program::pubkey::Pubkey,
    std::{path::Path, str::FromStr},
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PayloadJson {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    #[serde(default)]
    pub seller_fee_basis_points: u16,
    #[serde(default)]
    pub creators: Option<Vec<CreatorJson>>,
    #[serde(default)]
    pub collection: Option<CollectionJson>,
    #[serde(default)]
    pub uses: Option<UsesJson>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatorJson {
    pub address: String,
    #[serde(default)]
    pub verified: bool,
    pub share: u8,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionJson {
    #[serde(default)]
    pub verified: bool,
    pub key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UseMethodJson {
    Burn,
    Multiple,
    Single,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsesJson {
    pub use_method: UseMethodJson,
    pub remaining: u64,
    pub total: u64,
}

pub fn parse_pubkey(s: &str) -> anyhow::Result<Pubkey> {
    Pubkey::from_str(s.trim()).with_context(|| format!("invalid pubkey {s:?}"))
}

impl PayloadJson {
    pub fn into_data(self) -> anyhow::Result<MetadataData> {
        let creators = self
            .creators
            .map(|creators| {
                creators
                    .into_iter()
                    .map(|c| {
                        Ok(Creator {
                            address: parse_pubkey(&c.address)?,
                            verified: c.verified,
                            share: c.share,
                        })
                    })
                    .collect::<anyhow::Result<Vec<_>>>()
            })
            .transpose()?;

        let collection = self
            .collection
            .map(|c| -> anyhow::Result<Collection> {
                Ok(Collection {
                    verified: c.verified,
                    key: parse_pubkey(&c.key)?,
                })
            })
            .transpose()?;

        let uses = self.uses.map(|u| Uses {
            use_method: match u.use_method {
                UseMethodJson::Burn => UseMethod::Burn,
                UseMethodJson::Multiple => UseMethod::Multiple,
                UseMethodJson::Single => UseMethod::Single,
            },
            remaining: u.remaining,
            total: u.total,
        });

        Ok(MetadataData {
            name: self.name,
            symbol: self.symbol,
            uri: self.uri,
            seller_fee_basis_points: self.seller_fee_basis_points,
            creators,
            collection,
            uses,
        })
    }
}

/// Read and convert a payload file.
pub fn load_payload(path: &Path) -> anyhow::Result<MetadataData> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let json: PayloadJson =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    json.into_data()
}
