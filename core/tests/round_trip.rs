use itertools::Itertools;
use openapi_param_codec::{build_codec, parse_parameter_spec, Codec, ValueCodec};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn codec(version: &str, parameter: Value) -> Codec {
    let spec = parse_parameter_spec(version, &parameter).unwrap();
    build_codec(&spec).unwrap()
}

fn rgb() -> Value {
    json!({
        "type": "object",
        "properties": {
            "R": {"type": "integer"},
            "G": {"type": "integer"},
            "B": {"type": "integer"}
        }
    })
}

fn string_array() -> Value {
    json!({"type": "array", "items": {"type": "string"}})
}

fn assert_round_trip(codec: &Codec, wire: &str, value: Value) {
    let parsed = codec.try_parse(Some(wire)).unwrap();
    assert_eq!(parsed.as_ref(), Some(&value), "parsing '{}'", wire);
    assert_eq!(
        codec.serialize(Some(&value)).unwrap().as_deref(),
        Some(wire),
        "serializing {}",
        value
    );
}

#[test]
fn test_openapi_3_1_primitive_styles() {
    let cases = [
        ("path", "simple", "5"),
        ("path", "label", ".5"),
        ("path", "matrix", ";id=5"),
        ("query", "form", "id=5"),
        ("cookie", "form", "id=5"),
        ("header", "simple", "5"),
    ];
    for (location, style, wire) in cases {
        let codec = codec(
            "3.1",
            json!({"name": "id", "in": location, "style": style, "schema": {"type": "integer"}}),
        );
        assert_round_trip(&codec, wire, json!(5));
    }
}

#[test]
fn test_openapi_3_1_array_styles() {
    let value = json!(["blue", "black", "brown"]);
    let cases = [
        ("path", "simple", false, "blue,black,brown"),
        ("path", "simple", true, "blue,black,brown"),
        ("path", "label", false, ".blue.black.brown"),
        ("path", "label", true, ".blue.black.brown"),
        ("path", "matrix", false, ";color=blue,black,brown"),
        ("path", "matrix", true, ";color=blue;color=black;color=brown"),
        ("query", "form", false, "color=blue,black,brown"),
        ("query", "form", true, "color=blue&color=black&color=brown"),
        ("query", "spaceDelimited", false, "color=blue%20black%20brown"),
        ("query", "spaceDelimited", true, "color=blue&color=black&color=brown"),
        ("query", "pipeDelimited", false, "color=blue|black|brown"),
        ("query", "pipeDelimited", true, "color=blue&color=black&color=brown"),
    ];
    for (location, style, explode, wire) in cases {
        let codec = codec(
            "3.1",
            json!({
                "name": "color", "in": location, "style": style, "explode": explode,
                "schema": string_array()
            }),
        );
        assert_round_trip(&codec, wire, value.clone());
    }
}

#[test]
fn test_openapi_3_1_object_styles() {
    let value = json!({"R": 100, "G": 200, "B": 150});
    let cases = [
        ("path", "simple", false, "R,100,G,200,B,150"),
        ("path", "simple", true, "R=100,G=200,B=150"),
        ("path", "label", false, ".R.100.G.200.B.150"),
        ("path", "label", true, ".R=100.G=200.B=150"),
        ("path", "matrix", false, ";color=R,100,G,200,B,150"),
        ("path", "matrix", true, ";R=100;G=200;B=150"),
        ("query", "form", false, "color=R,100,G,200,B,150"),
        ("query", "spaceDelimited", false, "color=R%20100%20G%20200%20B%20150"),
        ("query", "pipeDelimited", false, "color=R|100|G|200|B|150"),
        ("query", "deepObject", true, "color[R]=100&color[G]=200&color[B]=150"),
    ];
    for (location, style, explode, wire) in cases {
        let codec = codec(
            "3.1",
            json!({
                "name": "color", "in": location, "style": style, "explode": explode,
                "schema": rgb()
            }),
        );
        assert_round_trip(&codec, wire, value.clone());
    }
}

#[test]
fn test_openapi_3_0_matches_3_1() {
    let parameter = json!({
        "name": "color", "in": "query", "style": "pipeDelimited", "explode": false,
        "schema": string_array()
    });
    for version in ["3", "3.0", "3.0.3"] {
        let codec = codec(version, parameter.clone());
        assert_round_trip(&codec, "color=a|b", json!(["a", "b"]));
    }
}

#[test]
fn test_openapi_3_2_cookie_styles() {
    let cases = [
        (json!({"type": "integer"}), true, "id=5", json!(5)),
        (string_array(), true, "id=a; id=b", json!(["a", "b"])),
        (string_array(), false, "id=a,b", json!(["a", "b"])),
        (rgb(), true, "R=1; G=2; B=3", json!({"R": 1, "G": 2, "B": 3})),
        (rgb(), false, "id=R,1,G,2,B,3", json!({"R": 1, "G": 2, "B": 3})),
    ];
    for (schema, explode, wire, value) in cases {
        let codec = codec(
            "3.2",
            json!({"name": "id", "in": "cookie", "style": "cookie", "explode": explode, "schema": schema}),
        );
        assert_round_trip(&codec, wire, value);
    }
}

#[test]
fn test_swagger2_round_trips() {
    let cases = [
        (json!({"name": "id", "in": "path", "type": "integer"}), "7", json!(7)),
        (json!({"name": "id", "in": "query", "type": "number"}), "id=1.5", json!(1.5)),
        (json!({"name": "on", "in": "header", "type": "boolean"}), "true", json!(true)),
        (
            json!({"name": "ids", "in": "path", "type": "array", "items": {"type": "integer"}, "collectionFormat": "pipes"}),
            "1|2|3",
            json!([1, 2, 3]),
        ),
        (
            json!({"name": "ids", "in": "formData", "type": "array", "items": {"type": "string"}, "collectionFormat": "multi"}),
            "ids=a&ids=b",
            json!(["a", "b"]),
        ),
    ];
    for (parameter, wire, value) in cases {
        let codec = codec("2.0", parameter);
        assert_round_trip(&codec, wire, value);
    }
}

#[test]
fn test_percent_encoded_values_round_trip() {
    let codec = codec(
        "3.1",
        json!({"name": "q", "in": "query", "explode": false, "schema": string_array()}),
    );
    let value = json!(["a b", "c,d", "é"]);
    let wire = codec.serialize(Some(&value)).unwrap().unwrap();
    assert_eq!(wire, "q=a%20b,c%2Cd,%C3%A9");
    assert_eq!(codec.try_parse(Some(wire.as_str())).unwrap(), Some(value));
}

#[test]
fn test_object_pair_permutations_parse_identically() {
    let expected = json!({"R": 100, "G": 200, "B": 150});
    let pairs = [("R", "100"), ("G", "200"), ("B", "150")];

    let simple_exploded = codec(
        "3.1",
        json!({"name": "color", "in": "path", "style": "simple", "explode": true, "schema": rgb()}),
    );
    let matrix_exploded = codec(
        "3.1",
        json!({"name": "color", "in": "path", "style": "matrix", "explode": true, "schema": rgb()}),
    );
    let matrix_flat = codec(
        "3.1",
        json!({"name": "color", "in": "path", "style": "matrix", "explode": false, "schema": rgb()}),
    );
    let deep = codec(
        "3.1",
        json!({"name": "color", "in": "query", "style": "deepObject", "explode": true, "schema": rgb()}),
    );

    for permutation in pairs.iter().permutations(pairs.len()) {
        let simple = permutation.iter().map(|(k, v)| format!("{k}={v}")).join(",");
        let matrix = permutation.iter().map(|(k, v)| format!(";{k}={v}")).join("");
        let flat = permutation.iter().map(|(k, v)| format!("{k},{v}")).join(",");
        let deep_wire = permutation
            .iter()
            .map(|(k, v)| format!("color[{k}]={v}"))
            .join("&");

        for (codec, wire) in [
            (&simple_exploded, simple),
            (&matrix_exploded, matrix),
            (&matrix_flat, format!(";color={flat}")),
            (&deep, deep_wire),
        ] {
            let parsed = codec.try_parse(Some(wire.as_str())).unwrap();
            assert_eq!(parsed.as_ref(), Some(&expected), "parsing '{}'", wire);
        }
    }
}

#[test]
fn test_serialize_preserves_insertion_order() {
    let codec = codec(
        "3.1",
        json!({"name": "color", "in": "path", "style": "simple", "explode": true, "schema": rgb()}),
    );
    let parsed = codec.try_parse(Some("B=150,R=100,G=200")).unwrap();
    assert_eq!(
        codec.serialize(parsed.as_ref()).unwrap().as_deref(),
        Some("B=150,R=100,G=200")
    );
}

fn assert_value_round_trip(codec: &Codec, value: &Value, context: &str) {
    let wire = codec.serialize(Some(value)).unwrap();
    let parsed = codec.try_parse(wire.as_deref()).unwrap();
    assert_eq!(parsed.as_ref(), Some(value), "{} via {:?}", context, wire);
}

const ARRAY_STYLES: [(&str, &str, bool); 12] = [
    ("path", "simple", false),
    ("path", "simple", true),
    ("path", "label", false),
    ("path", "label", true),
    ("path", "matrix", false),
    ("path", "matrix", true),
    ("query", "form", false),
    ("query", "form", true),
    ("query", "spaceDelimited", false),
    ("query", "spaceDelimited", true),
    ("query", "pipeDelimited", false),
    ("query", "pipeDelimited", true),
];

const OBJECT_STYLES: [(&str, &str, bool); 10] = [
    ("path", "simple", false),
    ("path", "simple", true),
    ("path", "label", false),
    ("path", "label", true),
    ("path", "matrix", false),
    ("path", "matrix", true),
    ("query", "form", false),
    ("query", "spaceDelimited", false),
    ("query", "pipeDelimited", false),
    ("query", "deepObject", true),
];

#[test]
fn test_typed_arrays_survive_every_style() {
    let cases = [
        ("number", json!([1.5, -2, 0.25])),
        ("integer", json!([10, -3, 0])),
        ("boolean", json!([true, false, true])),
        ("string", json!(["a,b", "c.d", "e;f", "g|h", "i&j", "k=l", "1.5"])),
    ];
    for version in ["3.0", "3.1", "3.2"] {
        for (location, style, explode) in ARRAY_STYLES {
            for (item_type, value) in &cases {
                let codec = codec(
                    version,
                    json!({
                        "name": "list", "in": location, "style": style, "explode": explode,
                        "schema": {"type": "array", "items": {"type": item_type}}
                    }),
                );
                let context = format!("{version} {style} explode={explode} {item_type}");
                assert_value_round_trip(&codec, value, &context);
            }
        }
    }
}

#[test]
fn test_typed_objects_survive_every_style() {
    let schema = json!({
        "type": "object",
        "properties": {
            "n": {"type": "number"},
            "b": {"type": "boolean"},
            "s": {"type": "string"}
        }
    });
    let value = json!({"n": 1.5, "b": true, "s": "x.y,z;w|v&u=t"});
    for version in ["3.0", "3.1", "3.2"] {
        for (location, style, explode) in OBJECT_STYLES {
            let codec = codec(
                version,
                json!({
                    "name": "obj", "in": location, "style": style, "explode": explode,
                    "schema": schema.clone()
                }),
            );
            let context = format!("{version} {style} explode={explode}");
            assert_value_round_trip(&codec, &value, &context);
        }
    }
}

#[test]
fn test_label_wire_escapes_dots() {
    let numbers = codec(
        "3.1",
        json!({"name": "v", "in": "path", "style": "label", "schema": {"type": "array", "items": {"type": "number"}}}),
    );
    assert_round_trip(&numbers, ".1%2E5.2", json!([1.5, 2]));

    let object = codec(
        "3.1",
        json!({"name": "v", "in": "path", "style": "label", "explode": true, "schema": {"type": "object"}}),
    );
    assert_round_trip(&object, ".a=x%2Ey", json!({"a": "x.y"}));
}

#[test]
fn test_openapi_3_2_non_cookie_locations() {
    let path = codec(
        "3.2",
        json!({"name": "id", "in": "path", "style": "matrix", "schema": {"type": "array", "items": {"type": "string"}}}),
    );
    assert_round_trip(&path, ";id=a%2Cb,c", json!(["a,b", "c"]));

    let query = codec(
        "3.2",
        json!({"name": "q", "in": "query", "explode": false, "schema": string_array()}),
    );
    assert_round_trip(&query, "q=a%20b,c", json!(["a b", "c"]));

    let header = codec(
        "3.2",
        json!({"name": "X-Tags", "in": "header", "schema": string_array()}),
    );
    assert_round_trip(&header, "a b,c%", json!(["a b", "c%"]));

    let flag = codec(
        "3.2",
        json!({"name": "X-Flag", "in": "header", "schema": {"type": "boolean"}}),
    );
    assert_round_trip(&flag, "false", json!(false));
}

#[test]
fn test_allow_reserved_keeps_query_delimiters_escaped() {
    let exploded = codec(
        "3.1",
        json!({"name": "q", "in": "query", "allowReserved": true, "schema": string_array()}),
    );
    assert_round_trip(&exploded, "q=a%26b&q=c/d%2Ce", json!(["a&b", "c/d,e"]));

    let joined = codec(
        "3.1",
        json!({"name": "q", "in": "query", "allowReserved": true, "explode": false, "schema": string_array()}),
    );
    assert_round_trip(&joined, "q=a%26b,c/d%2Ce", json!(["a&b", "c/d,e"]));
}
