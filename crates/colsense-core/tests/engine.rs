use colsense_core::{
    AnalyzeOptions, Classifier, Column, ColumnTable, Dataset, Engine, EngineError, EngineOptions,
    InputError, NO_CLASSIFIER, TypeInference, UnitExtractor,
};
use colsense_model::catalog;
use colsense_model::{ClassifierSpec, Configuration, DataType, PatternSpec, UnitType};
use serde_json::{Value, json};

fn analyze(value: Value) -> colsense_core::Analysis {
    Engine::new()
        .analyze_json(value, &AnalyzeOptions::default())
        .unwrap()
}

#[test]
fn integer_lengths_in_millimeters() {
    let analysis = analyze(json!({"length_mm": [100, 200, 150]}));
    let result = analysis.get("length_mm").unwrap();
    assert_eq!(result.data_type, DataType::Integer);
    assert_eq!(result.unit, catalog::MILLIMETER);
    assert_eq!(result.unit.unit_type, UnitType::Length);
    assert!(result.confidence >= 0.5);
}

#[test]
fn float_weights_in_kilograms() {
    let analysis = analyze(json!({"weight_kg": [1.5, 2.0, 1.8]}));
    let result = analysis.get("weight_kg").unwrap();
    assert_eq!(result.data_type, DataType::Float);
    assert_eq!(result.unit, catalog::KILOGRAM);
    assert_eq!(result.unit.unit_type, UnitType::Mass);
}

#[test]
fn yes_no_flags_are_boolean() {
    let analysis = analyze(json!({"is_active": ["yes", "no", "yes"]}));
    let result = analysis.get("is_active").unwrap();
    assert_eq!(result.data_type, DataType::Boolean);
    assert_eq!(result.unit, catalog::NONE);
}

#[test]
fn architectural_thickness_pattern_sets_millimeters() {
    let options = AnalyzeOptions::new().with_active_classifiers(["Architectural"]);
    let analysis = Engine::new()
        .analyze_json(json!({"thickness": [100.0, 200.0, 150.0]}), &options)
        .unwrap();
    let result = analysis.get("thickness").unwrap();
    assert_eq!(result.data_type, DataType::Float);
    assert_eq!(result.unit, catalog::MILLIMETER);
    assert_eq!(result.classifier_name, "Architectural");
}

#[test]
fn integer_thickness_keeps_inferred_type() {
    let options = AnalyzeOptions::new().with_active_classifiers(["Architectural"]);
    let analysis = Engine::new()
        .analyze_json(json!({"thickness": [100, 200, 150]}), &options)
        .unwrap();
    let result = analysis.get("thickness").unwrap();
    assert_eq!(result.data_type, DataType::Integer);
    assert_eq!(result.unit, catalog::MILLIMETER);
    assert_eq!(result.unit.unit_type, UnitType::Length);
    assert_eq!(result.classifier_name, "Architectural");
}

#[test]
fn mostly_numeric_text_depends_on_threshold() {
    let data = json!({"mixed": ["1", "2", "text", null, "4"]});
    let analysis = analyze(data);
    assert_eq!(analysis.get("mixed").unwrap().data_type, DataType::String);

    let column = Column::from_values("mixed", [Some("1"), Some("2"), Some("text"), None, Some("4")]);
    let mut fallback = Classifier::fallback();
    fallback.setup_patterns();
    let result = fallback
        .classify_series(
            &column,
            &mut UnitExtractor::new(),
            &mut TypeInference::default().with_numeric_threshold(0.7),
        )
        .unwrap();
    assert_eq!(result.data_type, DataType::Integer);
    assert_eq!(result.non_convertible_count, 1);
    assert!((result.convertible_percentage() - 75.0).abs() < 1e-9);
}

#[test]
fn low_confidence_columns_fall_back_to_sentinel() {
    let mut engine = Engine::new()
        .with_type_inference(TypeInference::default().with_numeric_threshold(0.7));
    let analysis = engine
        .analyze_json(json!({"mixed": ["1", "2", "text", null, "4"]}), &AnalyzeOptions::default())
        .unwrap();
    let result = analysis.get("mixed").unwrap();
    assert_eq!(result.classifier_name, NO_CLASSIFIER);
    assert_eq!(result.data_type, DataType::Unknown);
    assert_eq!(result.unit, catalog::NONE);
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.total_values, 4);
    assert_eq!(result.null_count, 1);
}

#[test]
fn empty_inputs_give_empty_analysis() {
    assert!(analyze(json!({})).is_empty());
    assert!(analyze(json!([])).is_empty());

    let options = AnalyzeOptions::new().with_contains_headers(true);
    let analysis = Engine::new()
        .analyze_json(json!([["length_mm", "weight_kg"]]), &options)
        .unwrap();
    assert!(analysis.is_empty());
}

#[test]
fn unsupported_shapes_fail_fast() {
    let err = Engine::new()
        .analyze_json(json!("length_mm"), &AnalyzeOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Input(InputError::UnsupportedShape(_))
    ));
}

#[test]
fn row_sequences_use_headers() {
    let rows = json!([["length_mm", "label"], [100, "a"], [200, "b"], [150, "c"]]);
    let options = AnalyzeOptions::new().with_contains_headers(true);
    let analysis = Engine::new().analyze_json(rows, &options).unwrap();
    assert_eq!(analysis.names().collect::<Vec<_>>(), vec!["length_mm", "label"]);
    assert_eq!(analysis.get("length_mm").unwrap().unit, catalog::MILLIMETER);

    let rows = json!([[100, "a"], [200, "b"]]);
    let analysis = Engine::new().analyze_json(rows.clone(), &AnalyzeOptions::default()).unwrap();
    assert_eq!(analysis.names().collect::<Vec<_>>(), vec!["Column_0", "Column_1"]);

    let options = AnalyzeOptions::new().with_headers(["width_cm", "name"]);
    let analysis = Engine::new().analyze_json(rows, &options).unwrap();
    assert_eq!(analysis.get("width_cm").unwrap().unit, catalog::CENTIMETER);
}

#[test]
fn records_cover_every_key() {
    let records = json!([
        {"length_mm": 100},
        {"length_mm": 200, "weight_kg": 1.5},
        {"length_mm": 150, "weight_kg": 2.5}
    ]);
    let analysis = analyze(records);
    assert_eq!(analysis.names().collect::<Vec<_>>(), vec!["length_mm", "weight_kg"]);
    let weight = analysis.get("weight_kg").unwrap();
    assert_eq!(weight.null_count, 1);
    assert_eq!(weight.total_values, 2);
}

fn padded_rows(count: usize) -> Vec<Value> {
    let samples = [
        json!([100, 1.5, "yes", "wall", null]),
        json!([200, 2.25, "no", "slab", "x"]),
        json!([150, 1.75, "yes", null]),
    ];
    (0..count).map(|idx| samples[idx % samples.len()].clone()).collect()
}

#[test]
fn direct_and_table_strategies_agree() {
    let headers = ["length_mm", "weight_kg", "is_visible", "material", "notes"];
    let options = AnalyzeOptions::new().with_headers(headers);
    let rows = Dataset::from_json(Value::Array(padded_rows(10_001))).unwrap();

    let table = Engine::new().analyze(&rows, &options);
    let direct = Engine::new()
        .with_options(EngineOptions::default().with_data_thresholds(usize::MAX, usize::MAX))
        .analyze(&rows, &options);

    assert_eq!(table.len(), 5);
    for (name, result) in table.iter() {
        let other = direct.get(name).unwrap();
        assert_eq!(result.data_type, other.data_type, "{name}");
        assert_eq!(result.unit, other.unit, "{name}");
        assert_eq!(result.classifier_name, other.classifier_name, "{name}");
    }
    assert_eq!(table, direct);
}

#[test]
fn record_strategies_agree() {
    let records: Vec<Value> = (0..600)
        .map(|idx| {
            if idx % 2 == 0 {
                json!({"height_m": idx, "phase": "new"})
            } else {
                json!({"height_m": idx, "comment": "ok"})
            }
        })
        .collect();
    let dataset = Dataset::from_json(Value::Array(records)).unwrap();
    let options = AnalyzeOptions::default();
    let table = Engine::new().analyze(&dataset, &options);
    let direct = Engine::new()
        .with_options(EngineOptions::default().with_table_thresholds(usize::MAX, usize::MAX))
        .analyze(&dataset, &options);
    assert_eq!(table, direct);
    assert_eq!(table.names().collect::<Vec<_>>(), vec!["height_m", "phase", "comment"]);
}

#[test]
fn frames_and_tables_are_classified_per_column() {
    use polars::prelude::{Column as PlColumn, DataFrame};

    let df = DataFrame::new(vec![
        PlColumn::new("length_mm".into(), &[100i64, 200, 150]),
        PlColumn::new("weight_kg".into(), &[1.5f64, 2.0, 1.8]),
    ])
    .unwrap();
    let mut engine = Engine::new();
    let analysis = engine.analyze_frame(&df, None);
    assert_eq!(analysis.get("length_mm").unwrap().data_type, DataType::Integer);
    assert_eq!(analysis.get("weight_kg").unwrap().unit, catalog::KILOGRAM);

    let table = ColumnTable::from_frame(&df);
    assert_eq!(engine.analyze_table(&table, None), analysis);
}

#[test]
fn configuration_adds_classifier_and_mappings() {
    let mut config = Configuration::default();
    config
        .direct_mappings
        .insert("zoll".to_string(), "length (cm)".to_string());
    config
        .context_mappings
        .insert("luftmenge".to_string(), "flow_rate".to_string());
    config.classifiers.insert(
        "hvac".to_string(),
        ClassifierSpec {
            name: "HVAC".to_string(),
            priority: 5,
            patterns: vec![
                PatternSpec::new(".*airflow.*", "float").with_unit("flow_rate (m³/h)"),
            ],
        },
    );

    let mut engine = Engine::new();
    engine.load_configuration(&config).unwrap();
    assert_eq!(engine.registry().len(), 4);

    let analysis = engine
        .analyze_json(
            json!({"Airflow": [120.5, 98.25], "span_zoll": [1.5, 2.5]}),
            &AnalyzeOptions::default(),
        )
        .unwrap();
    let airflow = analysis.get("Airflow").unwrap();
    assert_eq!(airflow.unit, catalog::CUBIC_METER_PER_HOUR);
    assert_eq!(airflow.classifier_name, "HVAC");
    assert_eq!(analysis.get("span_zoll").unwrap().unit, catalog::CENTIMETER);
}

#[test]
fn configuration_without_defaults_replaces_everything() {
    let mut config = Configuration {
        merge_with_default: false,
        ..Configuration::default()
    };
    config.classifiers.insert(
        "general".to_string(),
        ClassifierSpec {
            name: "General".to_string(),
            priority: 3,
            patterns: vec![PatternSpec::new(".*flag.*", "boolean")],
        },
    );

    let mut engine = Engine::new();
    engine.load_configuration(&config).unwrap();
    assert_eq!(engine.classifier_names(), vec!["General"]);
    assert_eq!(engine.registry().get("general").unwrap().patterns().len(), 1);
    assert!(engine.unit_extractor().direct_mappings().is_empty());
    assert!(engine.unit_extractor().context_mappings().is_empty());
}

#[test]
fn merged_configuration_keeps_registered_classifiers() {
    let mut config = Configuration::default();
    config.classifiers.insert(
        "General".to_string(),
        ClassifierSpec {
            name: "General".to_string(),
            priority: 7,
            patterns: vec![],
        },
    );
    let mut engine = Engine::new();
    engine.load_configuration(&config).unwrap();
    let general = engine.registry().get("general").unwrap();
    assert_eq!(general.priority(), 1);
    assert_eq!(general.patterns().len(), 16);
}

#[test]
fn exported_keywords_reload_in_order() {
    let mut engine = Engine::new();
    let before = engine.unit_extractor_mut().extract_unit("temp_flow");
    assert_eq!(before.unit_type, UnitType::Temperature);

    let text = serde_json::to_string(&engine.export_configuration()).unwrap();
    let mut config: Configuration = serde_json::from_str(&text).unwrap();
    config.merge_with_default = false;
    config.classifiers.clear();

    let mut reloaded = Engine::new();
    reloaded.load_configuration(&config).unwrap();
    assert_eq!(
        reloaded.unit_extractor().context_mappings(),
        engine.unit_extractor().context_mappings()
    );
    assert_eq!(reloaded.unit_extractor_mut().extract_unit("temp_flow"), before);
}

#[test]
fn default_configuration_export() {
    let config = Engine::new().export_configuration();
    let patterns: usize = config
        .classifiers
        .values()
        .map(|classifier| classifier.patterns.len())
        .sum();
    let counts = json!({
        "classifiers": config.classifiers.keys().collect::<Vec<_>>(),
        "context_mappings": config.context_mappings.len(),
        "direct_mappings": config.direct_mappings.len(),
        "patterns": patterns,
    });
    insta::assert_json_snapshot!(counts, @r#"
    {
      "classifiers": [
        "architectural",
        "default",
        "general"
      ],
      "context_mappings": 54,
      "direct_mappings": 38,
      "patterns": 25
    }
    "#);

    assert_eq!(config.direct_mappings["pieces"], "quantity (Stk)");
    assert_eq!(config.context_mappings["länge"], "length");
    assert_eq!(config.classifiers["general"].priority, 1);
}

#[test]
fn exported_configuration_reloads() {
    let exported = Engine::new().export_configuration();
    let mut engine = Engine::new();
    engine.load_configuration(&exported).unwrap();
    assert_eq!(engine.registry().len(), 3);

    let analysis = engine
        .analyze_json(json!({"weight_kilogramm": [1.5, 2.5]}), &AnalyzeOptions::default())
        .unwrap();
    assert_eq!(analysis.get("weight_kilogramm").unwrap().unit, catalog::KILOGRAM);

    // The pattern-less default classifier exports priority 0.
    let replaced = Configuration {
        merge_with_default: false,
        ..exported
    };
    assert_eq!(
        engine.load_configuration(&replaced).unwrap_err(),
        colsense_core::ConfigError::MissingPriority("Default".to_string())
    );
    assert_eq!(engine.registry().len(), 3);
}
