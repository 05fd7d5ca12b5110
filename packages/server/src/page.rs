//! The village table page shell.
//!
//! The table body is rendered on the server; the inline script only swaps
//! in `/rows` fragments as the search input changes, and polls while the
//! initial load is still running. Only the newest request may update the
//! table; older ones are aborted and their responses dropped.

/// Marker replaced by the rendered table body.
const ROWS_MARKER: &str = "{{rows}}";

/// Marker replaced by the load status of the rendered body.
const STATUS_MARKER: &str = "{{status}}";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="id">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Batas Desa</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css">
</head>
<body>
<div class="container-fluid py-4">
    <input type="search" class="form-control mb-3" placeholder="Search village name..." autocomplete="off">
    <div class="table-responsive">
        <table class="table table-bordered table-striped align-middle">
            <thead>
                <tr>
                    <th scope="col">#</th>
                    <th scope="col">Name</th>
                    <th scope="col">District</th>
                    <th scope="col">Area</th>
                    <th scope="col">Center Coordinate</th>
                    <th scope="col">Geometry</th>
                </tr>
            </thead>
            <tbody data-status="{{status}}">
{{rows}}
            </tbody>
        </table>
    </div>
</div>
<script>
(() => {
    const input = document.querySelector(".form-control");
    const body = document.querySelector("tbody");

    let latest = 0;
    let inflight = null;

    async function refresh() {
        const request = ++latest;
        if (inflight) {
            inflight.abort();
        }
        inflight = new AbortController();

        let response;
        let html;
        try {
            response = await fetch("/rows?q=" + encodeURIComponent(input.value), {
                signal: inflight.signal,
            });
            html = await response.text();
        } catch (e) {
            return;
        }
        if (request !== latest) {
            return;
        }

        body.innerHTML = html;
        body.dataset.status = response.headers.get("X-Load-Status") || "";
        if (body.dataset.status === "pending") {
            setTimeout(refresh, 1000);
        }
    }

    input.addEventListener("input", refresh);
    if (body.dataset.status === "pending") {
        setTimeout(refresh, 1000);
    }
})();
</script>
</body>
</html>
"#;

/// Builds the full page around a rendered table body.
#[must_use]
pub fn render_page(rows_html: &str, status: &str) -> String {
    PAGE_TEMPLATE
        .replace(STATUS_MARKER, status)
        .replace(ROWS_MARKER, rows_html)
}
