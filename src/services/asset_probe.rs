// ============================================================================
// ASSET PROBE - existence checks for `{id}_x.png|jpg` interior images
// ============================================================================
// Probes run concurrently and share one AbortController so the owning view
// can cancel them all on unmount. Failed or aborted probes count as "absent".
// ============================================================================

use std::collections::HashSet;

use futures::future::join_all;
use gloo_net::http::{Method, RequestBuilder};
use web_sys::{AbortController, AbortSignal};

use crate::config::CONFIG;
use crate::models::PointOfInterest;

const EXTENSIONS: [&str; 2] = ["png", "jpg"];

/// Candidate URLs in probe order.
pub fn interior_image_urls(base_path: &str, id: i64) -> Vec<String> {
    EXTENSIONS
        .iter()
        .map(|ext| format!("{}/{}_x.{}", base_path, id, ext))
        .collect()
}

/// Split ids into known hits (no request needed) and ids still to probe.
/// Panoramic records are skipped: their category cannot change.
pub fn plan_probes(
    pois: &[PointOfInterest],
    known_interior_ids: &[i64],
) -> (HashSet<i64>, Vec<i64>) {
    let known: HashSet<i64> = known_interior_ids.iter().copied().collect();
    let mut hits = HashSet::new();
    let mut to_probe = Vec::new();
    for poi in pois {
        if known.contains(&poi.id) {
            hits.insert(poi.id);
        } else if !poi.has_embed() {
            to_probe.push(poi.id);
        }
    }
    (hits, to_probe)
}

/// Owns the AbortController shared by a batch of probes.
pub struct ProbeHandle {
    controller: Option<AbortController>,
}

impl ProbeHandle {
    pub fn new() -> Self {
        Self {
            controller: AbortController::new().ok(),
        }
    }

    pub fn signal(&self) -> Option<AbortSignal> {
        self.controller.as_ref().map(|c| c.signal())
    }

    pub fn abort(&self) {
        if let Some(controller) = &self.controller {
            controller.abort();
        }
    }
}

impl Default for ProbeHandle {
    fn default() -> Self {
        Self::new()
    }
}

async fn head_ok(url: &str, signal: Option<&AbortSignal>) -> bool {
    match RequestBuilder::new(url).method(Method::HEAD).abort_signal(signal).send().await {
        Ok(response) => response.ok(),
        Err(_) => false,
    }
}

/// First existing interior image for `id`, png before jpg.
pub async fn find_interior_image(id: i64, signal: Option<&AbortSignal>) -> Option<String> {
    for url in interior_image_urls(&CONFIG.probe_config.monastery_asset_path, id) {
        if head_ok(&url, signal).await {
            return Some(url);
        }
    }
    None
}

/// Ids of records with an interior asset, including the known seed list.
pub async fn probe_interiors(
    pois: &[PointOfInterest],
    signal: Option<AbortSignal>,
) -> HashSet<i64> {
    let (mut hits, to_probe) = plan_probes(pois, &CONFIG.probe_config.known_interior_ids);
    log::info!("🔎 [PROBE] {} known interiors, probing {} records", hits.len(), to_probe.len());

    let signal_ref = signal.as_ref();
    let results = join_all(to_probe.iter().map(|id| async move {
        (*id, find_interior_image(*id, signal_ref).await.is_some())
    }))
    .await;

    hits.extend(results.into_iter().filter(|(_, found)| *found).map(|(id, _)| id));
    log::info!("🔎 [PROBE] {} records have interior views", hits.len());
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poi(id: i64, embed: &str) -> PointOfInterest {
        PointOfInterest {
            id,
            name: format!("M{id}"),
            coordinates: "27.3,88.4".to_string(),
            map_url: String::new(),
            embed_html: embed.to_string(),
            short_description: String::new(),
            long_description: String::new(),
            booking: None,
        }
    }

    #[test]
    fn png_is_probed_before_jpg() {
        assert_eq!(
            interior_image_urls("/data/monastery", 42),
            vec!["/data/monastery/42_x.png", "/data/monastery/42_x.jpg"]
        );
    }

    #[test]
    fn known_ids_hit_without_request_and_panoramic_skipped() {
        let pois = vec![poi(9, ""), poi(10, "<iframe src=x>"), poi(42, "")];
        let (hits, to_probe) = plan_probes(&pois, &[9, 53]);
        assert_eq!(hits, HashSet::from([9]));
        assert_eq!(to_probe, vec![42]);
    }
}
