use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::prompts::nearby_prompt;
use crate::client::{ModelClient, ModelRequest, RawChunk, RawModelResponse};
use crate::error::Result;
use crate::log_debug;
use crate::types::{Coordinate, Interests, MapReference, NearbySearchResult};

/// Free-text, map-grounded search around a coordinate
#[derive(Clone)]
pub struct NearbyRequester {
    client: Arc<dyn ModelClient>,
    model: String,
}

impl NearbyRequester {
    pub fn new(client: Arc<dyn ModelClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub async fn find_nearby(
        &self,
        coordinate: Coordinate,
        interests: &Interests,
        cancellation: &CancellationToken,
    ) -> Result<NearbySearchResult> {
        log_debug!(
            "Searching near ({}, {}) for {} interest(s)",
            coordinate.latitude,
            coordinate.longitude,
            interests.len()
        );

        let request = ModelRequest::new(&self.model, nearby_prompt(coordinate, interests))?
            .with_maps_grounding(coordinate)
            .with_cancellation(cancellation.clone());

        let response = self.client.invoke(request).await?;
        let sources = normalize_sources(&response);

        log_debug!(
            "Kept {} of {} grounding chunks as map references",
            sources.len(),
            response.chunks().len()
        );

        Ok(NearbySearchResult {
            text: response.text().to_string(),
            sources,
        })
    }
}

/// Map references carried by a response, in provider order
///
/// Chunks without a maps sub-record, or whose record has no uri, are dropped.
/// Nothing is reordered or de-duplicated.
pub fn normalize_sources(response: &RawModelResponse) -> Vec<MapReference> {
    response.chunks().iter().filter_map(map_reference).collect()
}

fn map_reference(chunk: &RawChunk) -> Option<MapReference> {
    let maps = chunk.maps.as_ref()?;
    let uri = maps.uri.as_deref().filter(|uri| !uri.trim().is_empty())?;
    Some(MapReference {
        uri: uri.to_string(),
        title: maps.title.clone(),
    })
}
