// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Upload form.

use axum::response::Html;

const UPLOAD_FORM: &str = r#"<!DOCTYPE html>
<html>
<head><title>IFC Slicer</title></head>
<body>
<form action="/uploadfile/" enctype="multipart/form-data" method="post">
<input name="file" type="file" accept=".json,application/json">
<input type="submit" value="Upload">
</form>
</body>
</html>
"#;

/// GET / - HTML form posting a model file to `/uploadfile/`.
pub async fn upload_form() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}
