use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::error::js_error_message;
use crate::models::{Coordinates, GeoBounds};
use crate::utils::leaflet_ffi::{self as leaflet, LeafletMap, Layer, Marker};

use super::markers::MarkerSpec;
use super::traits::{BorderStyle, MapBackend, MapError, MapOptions, SelectionCallback};

const USER_COLOR: &str = "#7c3aed";

/// Leaflet implementation of the widget operations.
#[derive(Default)]
pub struct LeafletBackend {
    map: Option<LeafletMap>,
    marker_group: Option<Layer>,
    /// Click handlers live as long as their marker; dropped on clear.
    markers: Vec<(Marker, Closure<dyn FnMut()>)>,
    user_layers: Vec<Layer>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LeafletMapOptions {
    min_zoom: f64,
    max_zoom: f64,
    max_bounds: [[f64; 2]; 2],
    max_bounds_viscosity: f64,
    zoom_control: bool,
}

#[derive(Serialize)]
struct TileOptions<'a> {
    attribution: &'a str,
    #[serde(rename = "maxZoom")]
    max_zoom: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IconOptions<'a> {
    html: &'a str,
    class_name: &'a str,
    icon_size: [u32; 2],
    icon_anchor: [u32; 2],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TooltipOptions<'a> {
    permanent: bool,
    direction: &'a str,
    offset: [i32; 2],
    class_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CircleOptions<'a> {
    radius: f64,
    color: &'a str,
    fill_color: &'a str,
    fill_opacity: f64,
    weight: f64,
}

#[derive(Serialize)]
struct BorderOptions<'a> {
    style: &'a BorderStyle,
}

#[derive(Serialize)]
struct FitOptions {
    padding: [f64; 2],
}

fn ffi(err: JsValue) -> MapError {
    MapError::Ffi(js_error_message(&err))
}

fn container(container_id: &str) -> Option<web_sys::HtmlElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(container_id)?
        .dyn_into::<web_sys::HtmlElement>()
        .ok()
}

/// `{icon: L.divIcon(...)}` marker options.
fn marker_options(html: &str, class_name: &str) -> Result<JsValue, MapError> {
    let icon = leaflet::div_icon(&leaflet::to_js(&IconOptions {
        html,
        class_name,
        icon_size: [16, 16],
        icon_anchor: [8, 8],
    }).map_err(ffi)?);
    let options = js_sys::Object::new();
    js_sys::Reflect::set(&options, &JsValue::from_str("icon"), &icon).map_err(ffi)?;
    Ok(options.into())
}

impl LeafletBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self) -> Result<&LeafletMap, MapError> {
        self.map.as_ref().ok_or(MapError::NotReady)
    }

    fn clear_user_layers(&mut self) {
        for layer in self.user_layers.drain(..) {
            layer.remove_layer();
        }
    }
}

impl MapBackend for LeafletBackend {
    fn container_ready(&self, container_id: &str) -> bool {
        container(container_id)
            .map(|el| el.is_connected() && el.offset_width() > 0 && el.offset_height() > 0)
            .unwrap_or(false)
    }

    fn create(&mut self, options: &MapOptions) -> Result<(), MapError> {
        if !leaflet::leaflet_available() {
            return Err(MapError::Ffi("Leaflet is not loaded".to_string()));
        }
        let el = container(&options.container_id)
            .ok_or_else(|| MapError::ContainerNotReady(options.container_id.clone()))?;

        let js_options = leaflet::to_js(&LeafletMapOptions {
            min_zoom: options.min_zoom,
            max_zoom: options.max_zoom,
            max_bounds: options.max_bounds.as_pairs(),
            max_bounds_viscosity: options.max_bounds_viscosity,
            zoom_control: true,
        })
        .map_err(ffi)?;

        let map = leaflet::create_map(&el, &js_options).map_err(ffi)?;
        map.set_view(&leaflet::lat_lng(options.center.as_pair()), options.zoom);

        let tiles = leaflet::tile_layer(
            &options.tile_url,
            &leaflet::to_js(&TileOptions {
                attribution: &options.tile_attribution,
                max_zoom: options.max_zoom,
            })
            .map_err(ffi)?,
        );
        tiles.add_to(&map);

        let group = leaflet::layer_group();
        group.add_to(&map);
        map.invalidate_size();

        self.marker_group = Some(group);
        self.map = Some(map);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.map.is_some()
    }

    fn clear_markers(&mut self) -> Result<(), MapError> {
        for (marker, _handler) in self.markers.drain(..) {
            marker.off();
        }
        if let Some(group) = &self.marker_group {
            group.clear_layers();
        }
        Ok(())
    }

    fn add_marker(
        &mut self,
        spec: &MarkerSpec,
        on_select: SelectionCallback,
    ) -> Result<(), MapError> {
        let group = self.marker_group.as_ref().ok_or(MapError::NotReady)?;

        let category = spec.category;
        let options = marker_options(&category.icon_html(), category.css_class())?;
        let marker = leaflet::marker(&leaflet::lat_lng(spec.position.as_pair()), &options);
        marker.bind_popup(&spec.popup_html);
        marker.bind_tooltip(
            &spec.title,
            &leaflet::to_js(&TooltipOptions {
                permanent: false,
                direction: "top",
                offset: [0, -8],
                class_name: category.css_class(),
            })
            .map_err(ffi)?,
        );

        let target = spec.target;
        let handler = Closure::wrap(Box::new(move || on_select(target)) as Box<dyn FnMut()>);
        marker.on("click", handler.as_ref().unchecked_ref());
        group.add_layer(&marker);

        self.markers.push((marker, handler));
        Ok(())
    }

    fn add_border(
        &mut self,
        geojson: &serde_json::Value,
        style: &BorderStyle,
    ) -> Result<(), MapError> {
        let map = self.map()?;
        let data = leaflet::to_js(geojson).map_err(ffi)?;
        let options = leaflet::to_js(&BorderOptions { style }).map_err(ffi)?;
        let layer = leaflet::geo_json(&data, &options).map_err(ffi)?;
        layer.add_to(map);
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: &GeoBounds, padding_px: f64) -> Result<(), MapError> {
        let map = self.map()?;
        let js_bounds = leaflet::to_js(&bounds.as_pairs()).map_err(ffi)?;
        let options = leaflet::to_js(&FitOptions {
            padding: [padding_px, padding_px],
        })
        .map_err(ffi)?;
        map.fit_bounds(&js_bounds, &options);
        Ok(())
    }

    fn set_view(&mut self, center: Coordinates, zoom: f64) -> Result<(), MapError> {
        self.map()?.set_view(&leaflet::lat_lng(center.as_pair()), zoom);
        Ok(())
    }

    fn fly_to(&mut self, center: Coordinates, zoom: f64) -> Result<(), MapError> {
        self.map()?.fly_to(&leaflet::lat_lng(center.as_pair()), zoom);
        Ok(())
    }

    fn show_user_location(
        &mut self,
        position: Coordinates,
        radius_m: f64,
        popup_html: &str,
    ) -> Result<(), MapError> {
        self.clear_user_layers();
        let map = self.map()?;
        let center = leaflet::lat_lng(position.as_pair());

        let circle = leaflet::circle(
            &center,
            &leaflet::to_js(&CircleOptions {
                radius: radius_m,
                color: USER_COLOR,
                fill_color: USER_COLOR,
                fill_opacity: 0.1,
                weight: 2.0,
            })
            .map_err(ffi)?,
        );
        circle.add_to(map);

        let icon_html = format!(
            r#"<div class="marker-dot" style="background:{};width:16px;height:16px;border-radius:50%;border:2px solid #fff"></div>"#,
            USER_COLOR
        );
        let marker = leaflet::marker(&center, &marker_options(&icon_html, "user-marker")?);
        marker.add_to(map);
        marker.bind_popup(popup_html).open_popup();

        let marker_layer: Layer = marker.into();
        self.user_layers.push(circle);
        self.user_layers.push(marker_layer);
        Ok(())
    }

    fn destroy(&mut self, container_id: &str) {
        self.markers.clear();
        self.user_layers.clear();
        self.marker_group = None;
        if let Some(map) = self.map.take() {
            map.remove_map();
        }

        // Leaflet refuses to reuse a container that still carries its id
        if let Some(el) = container(container_id) {
            let _ = js_sys::Reflect::delete_property(
                el.unchecked_ref::<js_sys::Object>(),
                &JsValue::from_str("_leaflet_id"),
            );
            el.set_inner_html("");
            let style = el.style();
            let _ = style.remove_property("width");
            let _ = style.remove_property("height");
        }
    }
}
