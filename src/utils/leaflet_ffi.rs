// ============================================================================
// LEAFLET FFI - bindings to the global `L` namespace
// ============================================================================
// Wrappers only: no state, no logic
// ============================================================================

use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    pub type LeafletMap;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    pub fn create_map(
        container: &web_sys::HtmlElement,
        options: &JsValue,
    ) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    pub fn set_view(this: &LeafletMap, center: &JsValue, zoom: f64) -> LeafletMap;

    #[wasm_bindgen(method, js_name = flyTo)]
    pub fn fly_to(this: &LeafletMap, center: &JsValue, zoom: f64) -> LeafletMap;

    #[wasm_bindgen(method, js_name = fitBounds)]
    pub fn fit_bounds(this: &LeafletMap, bounds: &JsValue, options: &JsValue) -> LeafletMap;

    #[wasm_bindgen(method, js_name = invalidateSize)]
    pub fn invalidate_size(this: &LeafletMap);

    #[wasm_bindgen(method, js_name = remove)]
    pub fn remove_map(this: &LeafletMap);

    pub type Layer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn tile_layer(url_template: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    pub fn layer_group() -> Layer;

    #[wasm_bindgen(catch, js_namespace = L, js_name = geoJSON)]
    pub fn geo_json(data: &JsValue, options: &JsValue) -> Result<Layer, JsValue>;

    #[wasm_bindgen(js_namespace = L)]
    pub fn circle(center: &JsValue, options: &JsValue) -> Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Layer, map: &LeafletMap) -> Layer;

    #[wasm_bindgen(method, js_name = addLayer)]
    pub fn add_layer(this: &Layer, layer: &Layer) -> Layer;

    #[wasm_bindgen(method, js_name = clearLayers)]
    pub fn clear_layers(this: &Layer) -> Layer;

    #[wasm_bindgen(method, js_name = remove)]
    pub fn remove_layer(this: &Layer);

    #[wasm_bindgen(extends = Layer)]
    pub type Marker;

    #[wasm_bindgen(js_namespace = L)]
    pub fn marker(latlng: &JsValue, options: &JsValue) -> Marker;

    #[wasm_bindgen(js_namespace = L, js_name = divIcon)]
    pub fn div_icon(options: &JsValue) -> JsValue;

    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &Marker, html: &str) -> Marker;

    #[wasm_bindgen(method, js_name = bindTooltip)]
    pub fn bind_tooltip(this: &Marker, text: &str, options: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = openPopup)]
    pub fn open_popup(this: &Marker) -> Marker;

    #[wasm_bindgen(method)]
    pub fn on(this: &Marker, event: &str, handler: &js_sys::Function) -> Marker;

    /// Remove every listener bound to the marker.
    #[wasm_bindgen(method)]
    pub fn off(this: &Marker) -> Marker;
}

/// True when the Leaflet script has been loaded into the page.
pub fn leaflet_available() -> bool {
    js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("L")).unwrap_or(false)
}

/// Serialize options as plain JS objects (not ES `Map`s).
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// `[lat, lng]` array.
pub fn lat_lng(pair: [f64; 2]) -> JsValue {
    let array = js_sys::Array::new();
    array.push(&JsValue::from_f64(pair[0]));
    array.push(&JsValue::from_f64(pair[1]));
    array.into()
}
