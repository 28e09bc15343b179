//! Static response bodies used across harnesses.

/// A backend envelope with three records in the shapes seen in the wild:
/// nested geolocation, a flattened `event.original` key and a bare record.
pub const ENVELOPE_MIXED: &str = r#"{
  "message": [
    {
      "log_id": "3",
      "@timestamp": "2025-03-19T04:52:10Z",
      "attacker-id": "att-77",
      "event": { "original": "{\"geolocation\": \"{\\\"ip\\\": \\\"203.0.113.9\\\", \\\"country\\\": \\\"BR\\\"}\"}" },
      "gemini-response": "{\"description\": \"Credential stuffing against sshd\"}",
      "host": { "name": "honeypot-2" }
    },
    {
      "log_id": 1,
      "@timestamp": "2025-03-19T04:50:39Z",
      "event.original": { "geolocation": { "ip": "198.51.100.4" } },
      "message": "Port scan detected",
      "host": "honeypot-1"
    },
    {
      "current-interaction": "2025-03-19 04:51:00",
      "source": "nginx",
      "message": "GET /wp-login.php 404"
    }
  ]
}"#;

/// The same three records as a bare array, the shape `--file` also accepts.
pub const ARRAY_BARE: &str = r#"[
  { "log_id": "a", "@timestamp": "2025-03-19T05:00:00Z", "source": "auth", "message": "Failed password for root" },
  { "log_id": "b", "@timestamp": "2025-03-19T05:01:00Z", "source": "auth", "message": "Failed password for admin" }
]"#;

/// A raw Elasticsearch `_search` response.
pub const ELASTIC_HITS: &str = r#"{
  "took": 3,
  "hits": {
    "total": { "value": 2 },
    "hits": [
      { "_index": "attacker_logs", "_source": { "log_id": "e1", "@timestamp": "2025-03-19T05:02:00Z", "source": "syslog", "message": "kernel: martian source" } },
      { "_index": "attacker_logs", "_source": { "log_id": "e2", "@timestamp": "2025-03-19T05:03:00Z", "source": "nginx", "message": "POST /xmlrpc.php 403" } }
    ]
  }
}"#;

/// Not JSON at all.
pub const GARBAGE: &str = "<html><body>502 Bad Gateway</body></html>";
