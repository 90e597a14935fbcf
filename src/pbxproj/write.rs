use super::{Dict, Document, Value};
use std::collections::BTreeMap;
use std::fmt::Write as _;

const HEADER: &str = "// !$*UTF8*$!\n";

/// Object kinds Xcode writes on a single line.
const INLINE_ISA: &[&str] = &["PBXBuildFile", "PBXFileReference"];

/// Identifiers Xcode writes without their annotation: the value of these keys,
/// and the keys of `TargetAttributes`.
const BARE_VALUE_KEYS: &[&str] = &["remoteGlobalIDString"];
const BARE_KEYS_IN: &[&str] = &["TargetAttributes"];

pub(super) fn to_openstep(document: &Document) -> String {
    let mut writer = Writer {
        document,
        out: String::from(HEADER),
    };
    writer.value(&document.root, 0);
    writer.out.push('\n');
    writer.out
}

/// Xcode quotes anything outside this set, even where a reader would accept it bare.
fn is_plain(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '/' | ':' | '.')
}

fn needs_quotes(s: &str) -> bool {
    s.is_empty() || s.contains("//") || s.contains("___") || !s.chars().all(is_plain)
}

struct Writer<'a> {
    document: &'a Document,
    out: String,
}

impl Writer<'_> {
    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push('\t');
        }
    }

    fn token(&mut self, s: &str) {
        self.string(s);
        if let Some(note) = self.document.annotation(s) {
            let _ = write!(self.out, " /* {note} */");
        }
    }

    fn string(&mut self, s: &str) {
        if needs_quotes(s) {
            self.out.push('"');
            for c in s.chars() {
                match c {
                    '"' => self.out.push_str("\\\""),
                    '\\' => self.out.push_str("\\\\"),
                    '\n' => self.out.push_str("\\n"),
                    '\t' => self.out.push_str("\\t"),
                    c => self.out.push(c),
                }
            }
            self.out.push('"');
        } else {
            self.out.push_str(s);
        }
    }

    fn entry_key(&mut self, key: &str, bare: bool) {
        if bare {
            self.string(key);
        } else {
            self.token(key);
        }
    }

    fn entry_value(&mut self, key: &str, value: &Value, depth: usize, inline: bool) {
        match value {
            Value::String(s) if BARE_VALUE_KEYS.contains(&key) => self.string(s),
            Value::Dict(dict) if BARE_KEYS_IN.contains(&key) => {
                if inline {
                    self.inline_dict(dict, true)
                } else {
                    self.dict(dict, depth, true)
                }
            }
            value if inline => self.inline(value),
            value => self.value(value, depth),
        }
    }

    fn data(&mut self, bytes: &[u8]) {
        self.out.push('<');
        for b in bytes {
            let _ = write!(self.out, "{b:02x}");
        }
        self.out.push('>');
    }

    fn value(&mut self, value: &Value, depth: usize) {
        match value {
            Value::String(s) => self.token(s),
            Value::Data(bytes) => self.data(bytes),
            Value::Array(items) => {
                self.out.push_str("(\n");
                for item in items {
                    self.indent(depth + 1);
                    self.value(item, depth + 1);
                    self.out.push_str(",\n");
                }
                self.indent(depth);
                self.out.push(')');
            }
            Value::Dict(dict) => self.dict(dict, depth, false),
        }
    }

    fn dict(&mut self, dict: &Dict, depth: usize, bare_keys: bool) {
        self.out.push_str("{\n");
        for (key, value) in dict.iter() {
            self.indent(depth + 1);
            self.entry_key(key, bare_keys);
            self.out.push_str(" = ");
            match value {
                Value::Dict(objects) if depth == 0 && key == "objects" => {
                    self.objects(objects, depth + 1)
                }
                value => self.entry_value(key, value, depth + 1, false),
            }
            self.out.push_str(";\n");
        }
        self.indent(depth);
        self.out.push('}');
    }

    fn inline(&mut self, value: &Value) {
        match value {
            Value::String(s) => self.token(s),
            Value::Data(bytes) => self.data(bytes),
            Value::Array(items) => {
                self.out.push('(');
                for item in items {
                    self.inline(item);
                    self.out.push_str(", ");
                }
                self.out.push(')');
            }
            Value::Dict(dict) => self.inline_dict(dict, false),
        }
    }

    fn inline_dict(&mut self, dict: &Dict, bare_keys: bool) {
        self.out.push('{');
        for (key, value) in dict.iter() {
            self.entry_key(key, bare_keys);
            self.out.push_str(" = ");
            self.entry_value(key, value, 0, true);
            self.out.push_str("; ");
        }
        self.out.push('}');
    }

    /// The object table, grouped into one section per `isa`. Objects keep
    /// their document order inside a section.
    fn objects(&mut self, objects: &Dict, depth: usize) {
        let mut sections: BTreeMap<&str, Vec<(&str, &Value)>> = BTreeMap::new();
        for (id, object) in objects.iter() {
            let isa = object
                .as_dict()
                .and_then(|dict| dict.get("isa"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            sections.entry(isa).or_default().push((id, object));
        }

        self.out.push_str("{\n");
        for (isa, entries) in sections {
            let _ = writeln!(self.out, "\n/* Begin {isa} section */");
            for (id, object) in entries {
                self.indent(depth + 1);
                self.token(id);
                self.out.push_str(" = ");
                if INLINE_ISA.contains(&isa) {
                    self.inline(object);
                } else {
                    self.value(object, depth + 1);
                }
                self.out.push_str(";\n");
            }
            let _ = writeln!(self.out, "/* End {isa} section */");
        }
        self.indent(depth);
        self.out.push('}');
    }
}
