//! Shared HTML fixtures for integration tests, shaped like today's portal markup.

/// Dashboard page with three request rows (one ignore-listed) and a
/// last-page pager marker.
#[allow(dead_code)]
pub const DASHBOARD_PAGE: &str = r#"
<html><body>
  <table class="sticky my-requests views-table">
    <tr><th>Zone</th><th>Request date</th><th>Status</th></tr>
    <tr>
      <td><a href="/en/request/1234">com</a></td>
      <td>25 December 2024</td>
      <td>Approved</td>
    </tr>
    <tr>
      <td><a href="/en/request/1235">TEST</a></td>
      <td>25 December 2024</td>
      <td>Pending</td>
    </tr>
    <tr>
      <td><a href="/en/request/1236">org</a></td>
      <td>3 January 2025</td>
      <td>Pending</td>
    </tr>
  </table>
  <ul class="pager"><li class="pager-current last">1</li></ul>
</body></html>
"#;

/// Request detail page with typed fields and a two-row history table.
#[allow(dead_code)]
pub const DETAIL_PAGE: &str = r#"
<html><body>
  <div class="title-request">Zone:</div>
  <div class="field-request">com</div>
  <div class="title-request">IP addresses:</div>
  <div class="field-request">192.0.2.1<br/>198.51.100.7</div>
  <div class="title-request">Expires:</div>
  <div class="field-request">25 December 2024, 13:45:00 UTC</div>
  <div class="history-request">
    <table>
      <tr><th>Date</th><th>User</th><th>Action</th><th>Response</th></tr>
      <tr>
        <td>1 December 2024, 09:00:00 UTC</td>
        <td>user@example.com</td>
        <td>Request submitted</td>
        <td></td>
      </tr>
      <tr>
        <td>2 December 2024, 10:30:00 UTC</td>
        <td>admin@icann.org</td>
        <td>Request approved</td>
        <td>Welcome aboard</td>
      </tr>
    </table>
  </div>
</body></html>
"#;

/// Add-request form page with open, expired, and ignore-listed TLD
/// checkboxes plus the "All TLDs" catch-all.
#[allow(dead_code)]
pub const ADD_REQUEST_PAGE: &str = r#"
<html><body><form>
  <div class="form-item form-type-checkbox form-item-tlds-fieldset-tld-com">
    <input type="checkbox" name="tlds_fieldset[tld][com]" class="form-checkbox" />
    <label for="edit-tld-com">com</label>
  </div>
  <div class="form-item form-type-checkbox form-item-tlds-fieldset-tld-net">
    <input type="checkbox" name="tlds_fieldset[tld][net]" class="form-checkbox expired" />
    <label for="edit-tld-net">net</label>
  </div>
  <div class="form-item form-type-checkbox form-item-tlds-fieldset-tld-test2">
    <input type="checkbox" name="tlds_fieldset[tld][test2]" class="form-checkbox" />
    <label for="edit-tld-test2">test2</label>
  </div>
  <div class="form-item form-type-checkbox form-item-tlds-fieldset-tld-all">
    <input type="checkbox" name="tlds_fieldset[tld][all]" class="form-checkbox" />
    <label for="edit-tld-all">All TLDs</label>
  </div>
</form></body></html>
"#;
