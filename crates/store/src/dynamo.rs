//! DynamoDB-backed store client.
//!
//! Every trait call maps to exactly one SDK request against a table
//! keyed by `id`. SDK failures are rendered with their full cause chain
//! into [`StoreError::Request`]; the service layer decides what the
//! caller gets to see.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;

use crate::client::{CharacterStore, ScanPage};
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::models::character::{Character, UpdateCharacter};

const ATTR_ID: &str = "id";
const ATTR_NAME: &str = "name";
const ATTR_EPISODES: &str = "episodes";
const ATTR_PLANET: &str = "planet";

/// Store client backed by a DynamoDB table keyed by `id`.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    /// Resolve AWS configuration from the environment and build a
    /// client for the configured table. `DYNAMODB_ENDPOINT` overrides
    /// the endpoint for local table emulators.
    pub async fn connect(config: &StoreConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(endpoint) = config.endpoint_url.as_deref() {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        Self {
            client: Client::new(&sdk_config),
            table_name: config.table_name.clone(),
        }
    }

    /// Build a store around an existing SDK client.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl CharacterStore for DynamoStore {
    async fn put(&self, character: &Character) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_item(character)))
            .send()
            .await
            .map_err(request_fault)?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Character>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(ATTR_ID, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(request_fault)?;

        output.item.as_ref().map(from_item).transpose()
    }

    async fn scan(
        &self,
        limit: i32,
        start_after: Option<&str>,
    ) -> Result<ScanPage, StoreError> {
        let start_key = start_after.map(|id| {
            HashMap::from([(ATTR_ID.to_string(), AttributeValue::S(id.to_string()))])
        });

        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .limit(limit)
            .set_exclusive_start_key(start_key)
            .send()
            .await
            .map_err(request_fault)?;

        let items = output
            .items()
            .iter()
            .map(from_item)
            .collect::<Result<Vec<_>, _>>()?;
        let last_key = output
            .last_evaluated_key()
            .map(|key| required_string(key, ATTR_ID))
            .transpose()?;

        Ok(ScanPage { items, last_key })
    }

    async fn update(
        &self,
        id: &str,
        patch: &UpdateCharacter,
    ) -> Result<Character, StoreError> {
        let expr = build_update_expression(patch);

        let output = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(ATTR_ID, AttributeValue::S(id.to_string()))
            .update_expression(expr.expression)
            .set_expression_attribute_names(Some(expr.names))
            .set_expression_attribute_values(expr.values)
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(request_fault)?;

        let attributes = output
            .attributes
            .ok_or_else(|| StoreError::Malformed("update returned no attributes".to_string()))?;
        from_item(&attributes)
    }

    async fn delete(&self, id: &str) -> Result<Option<Character>, StoreError> {
        let output = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(ATTR_ID, AttributeValue::S(id.to_string()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(request_fault)?;

        output.attributes.as_ref().map(from_item).transpose()
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(request_fault)?;
        Ok(())
    }
}

/// Render an SDK failure with its full cause chain. The text ends up in
/// the log, never in a response body.
fn request_fault<E>(err: SdkError<E>) -> StoreError
where
    E: std::error::Error + Send + Sync + 'static,
{
    StoreError::Request(format!("{}", DisplayErrorContext(err)))
}

// ---------------------------------------------------------------------------
// Item marshalling
// ---------------------------------------------------------------------------

/// Marshal a record into a DynamoDB item map. An absent planet writes
/// no attribute at all.
fn to_item(character: &Character) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert(ATTR_ID.to_string(), AttributeValue::S(character.id.clone()));
    item.insert(
        ATTR_NAME.to_string(),
        AttributeValue::S(character.name.clone()),
    );
    item.insert(
        ATTR_EPISODES.to_string(),
        AttributeValue::L(
            character
                .episodes
                .iter()
                .cloned()
                .map(AttributeValue::S)
                .collect(),
        ),
    );
    if let Some(planet) = &character.planet {
        item.insert(ATTR_PLANET.to_string(), AttributeValue::S(planet.clone()));
    }
    item
}

/// Unmarshal an item map back into a record.
///
/// Only the key is structurally required. `name` and `episodes` decode
/// to their empty values when the attribute is missing, since an update
/// that omitted them removes the attribute from the item. A present
/// attribute of the wrong type is a [`StoreError::Malformed`].
fn from_item(item: &HashMap<String, AttributeValue>) -> Result<Character, StoreError> {
    let id = required_string(item, ATTR_ID)?;
    let name = optional_string(item, ATTR_NAME)?.unwrap_or_default();
    let episodes = match item.get(ATTR_EPISODES) {
        Some(value) => episode_list(value)?,
        None => Vec::new(),
    };
    let planet = optional_string(item, ATTR_PLANET)?;

    Ok(Character {
        id,
        name,
        episodes,
        planet,
    })
}

fn required_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, StoreError> {
    optional_string(item, key)?
        .ok_or_else(|| StoreError::Malformed(format!("missing string attribute `{key}`")))
}

fn optional_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<Option<String>, StoreError> {
    match item.get(key) {
        Some(value) => value
            .as_s()
            .ok()
            .cloned()
            .map(Some)
            .ok_or_else(|| StoreError::Malformed(format!("non-string attribute `{key}`"))),
        None => Ok(None),
    }
}

fn episode_list(value: &AttributeValue) -> Result<Vec<String>, StoreError> {
    let list = value
        .as_l()
        .ok()
        .ok_or_else(|| StoreError::Malformed("non-list attribute `episodes`".to_string()))?;
    list.iter()
        .map(|entry| entry.as_s().ok().cloned())
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| StoreError::Malformed("non-string entry in `episodes`".to_string()))
}

// ---------------------------------------------------------------------------
// Update expression
// ---------------------------------------------------------------------------

/// Pieces of an `UpdateItem` call: the expression plus its attribute
/// name and value maps.
struct UpdateExpression {
    expression: String,
    names: HashMap<String, String>,
    values: Option<HashMap<String, AttributeValue>>,
}

/// Build the update expression covering all three mutable attributes.
///
/// Present patch fields land in a `SET` clause, absent ones in a
/// `REMOVE` clause, so every update writes the full attribute set.
/// `name` is a DynamoDB reserved word and always goes through the
/// `#name` alias; since it appears in one clause or the other, the
/// alias is always used.
fn build_update_expression(patch: &UpdateCharacter) -> UpdateExpression {
    let mut sets: Vec<String> = Vec::new();
    let mut removes: Vec<&str> = Vec::new();
    let mut values: HashMap<String, AttributeValue> = HashMap::new();

    match &patch.name {
        Some(name) => {
            sets.push("#name = :name".to_string());
            values.insert(":name".to_string(), AttributeValue::S(name.clone()));
        }
        None => removes.push("#name"),
    }
    match &patch.episodes {
        Some(episodes) => {
            sets.push(format!("{ATTR_EPISODES} = :episodes"));
            values.insert(
                ":episodes".to_string(),
                AttributeValue::L(episodes.iter().cloned().map(AttributeValue::S).collect()),
            );
        }
        None => removes.push(ATTR_EPISODES),
    }
    match &patch.planet {
        Some(planet) => {
            sets.push(format!("{ATTR_PLANET} = :planet"));
            values.insert(":planet".to_string(), AttributeValue::S(planet.clone()));
        }
        None => removes.push(ATTR_PLANET),
    }

    let mut clauses: Vec<String> = Vec::new();
    if !sets.is_empty() {
        clauses.push(format!("SET {}", sets.join(", ")));
    }
    if !removes.is_empty() {
        clauses.push(format!("REMOVE {}", removes.join(", ")));
    }

    UpdateExpression {
        expression: clauses.join(" "),
        names: HashMap::from([("#name".to_string(), ATTR_NAME.to_string())]),
        // DynamoDB rejects an empty value map, so an all-REMOVE
        // expression sends none at all.
        values: (!values.is_empty()).then_some(values),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
