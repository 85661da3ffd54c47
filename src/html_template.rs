// HTML template for the generated map document.
//
// Placeholders are replaced verbatim by `render_map_html`. JSON payloads must
// already be safe to inline inside a <script> element.
const MAP_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Photo Map</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
    <style>
        body { margin: 0; padding: 0; font-family: Arial, sans-serif; }
        #map { height: 100vh; width: 100%; }
        .photo-frame { border: none; }
    </style>
</head>
<body>
    <div id="map"></div>

    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
    <!-- HEAT_SCRIPT_PLACEHOLDER -->
    <script>
        const view = __VIEW_JSON__;
        const markers = __MARKERS_JSON__;

        // Initialize map
        const map = L.map('map').setView([view.lat, view.lng], view.zoom);

        // Add tile layer
        L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
            attribution: '&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors'
        }).addTo(map);

        // One marker per photo, popup content isolated in an iframe
        markers.forEach(m => {
            const frame = document.createElement('iframe');
            frame.className = 'photo-frame';
            frame.srcdoc = m.popup;
            frame.width = view.popup_width;
            frame.height = view.popup_height;

            L.marker([m.lat, m.lng])
                .bindPopup(frame, { maxWidth: view.popup_width + 20 })
                .bindTooltip(m.label)
                .addTo(map);
        });

        // HEAT_LAYER_PLACEHOLDER
    </script>
</body>
</html>
"#;

const HEAT_SCRIPT: &str =
    r#"<script src="https://unpkg.com/leaflet.heat@0.2.0/dist/leaflet-heat.js"></script>"#;

/// Fills the map template. `heat_json` is `None` when there is no heat layer;
/// neither the plugin script nor the layer is emitted in that case.
pub fn render_map_html(view_json: &str, markers_json: &str, heat_json: Option<&str>) -> String {
    let html = MAP_HTML
        .replace("__VIEW_JSON__", view_json)
        .replace("__MARKERS_JSON__", markers_json);

    match heat_json {
        Some(points) => html
            .replace("<!-- HEAT_SCRIPT_PLACEHOLDER -->", HEAT_SCRIPT)
            .replace(
                "// HEAT_LAYER_PLACEHOLDER",
                &format!("L.heatLayer({}).addTo(map);", points),
            ),
        None => html
            .replace("<!-- HEAT_SCRIPT_PLACEHOLDER -->\n", "")
            .replace("// HEAT_LAYER_PLACEHOLDER\n", ""),
    }
}
