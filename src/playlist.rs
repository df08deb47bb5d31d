use regex::Regex;

/// Canonical EPG document every published playlist points at.
pub const EPG_URL: &str = "https://lichphatsong.site/schedule/epg.xml";

/// Rewrites an M3U playlist so multicast entries go through a udpxy relay.
///
/// `rtp://` and `udp://` entry lines (with or without the `@` sigil) become
/// `http://{host}:{port}/rtp/{target}`; the `#EXTM3U` header is normalized to
/// carry exactly one `url-tvg` attribute pointing at [`EPG_URL`], synthesized
/// if the source has no header at all. Every other line passes through
/// unchanged.
pub fn transform(raw: &str, host: &str, port: u16) -> String {
    if raw.trim().is_empty() {
        return format!("#EXTM3U url-tvg=\"{EPG_URL}\"\n");
    }

    let re_tvg = Regex::new(r#"url-tvg="[^"]+""#).unwrap();

    let raw = raw.replace('\r', "");
    let mut out: Vec<String> = Vec::new();

    for (i, line) in raw.split('\n').enumerate() {
        let t = line.trim();

        if i == 0 {
            if t.starts_with("#EXTM3U") {
                out.push(rewrite_header(t, &re_tvg));
                continue;
            }
            // Source has no header: synthesize one, then treat this line
            // like any other.
            out.push(format!("#EXTM3U url-tvg=\"{EPG_URL}\""));
        }

        // Comments, tags and blank lines pass through verbatim.
        if t.is_empty() || t.starts_with('#') {
            out.push(line.to_string());
            continue;
        }

        let lower = t.to_lowercase();
        if lower.starts_with("rtp://@") || lower.starts_with("udp://@") {
            let target = t.split_once('@').map_or("", |(_, rest)| rest);
            out.push(format!("http://{host}:{port}/rtp/{target}"));
            continue;
        }
        if lower.starts_with("rtp://") || lower.starts_with("udp://") {
            let target = t.split_once("://").map_or("", |(_, rest)| rest);
            // At most one sigil is consumed; udpxy takes the rest as-is.
            let target = target.strip_prefix('@').unwrap_or(target);
            out.push(format!("http://{host}:{port}/rtp/{target}"));
            continue;
        }

        out.push(line.to_string());
    }

    out.join("\n") + "\n"
}

/// Replaces an existing `url-tvg="..."` value, or appends the attribute when
/// the header carries none.
fn rewrite_header(header: &str, re_tvg: &Regex) -> String {
    if re_tvg.is_match(header) {
        let canonical = format!("url-tvg=\"{EPG_URL}\"");
        return re_tvg.replace(header, canonical.as_str()).into_owned();
    }
    if header == "#EXTM3U" {
        format!("#EXTM3U url-tvg=\"{EPG_URL}\"")
    } else {
        // Keep whatever other attributes the header already carries.
        format!("{header} url-tvg=\"{EPG_URL}\"")
    }
}
