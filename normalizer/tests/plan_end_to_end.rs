use plan_normalizer::{ChangeIdMode, FormatOptions, PlanChanges, State};

use plan_defs::RecordShape;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

#[test]
fn update_plan_produces_one_attribute_change() {
    let plan = json!({
        "resource_changes": [{
            "address": "aws_instance.x",
            "change": {
                "actions": ["update"],
                "before": {"tags": {"env": "dev"}},
                "after": {"tags": {"env": "prod"}},
                "before_sensitive": {},
                "after_sensitive": {},
                "after_unknown": {},
            }
        }]
    });

    let changes = PlanChanges::from_value(&plan, &FormatOptions::default()).unwrap();
    assert_eq!(
        changes.records(),
        vec![json!([
            {
                "address": "aws_instance.x",
                "action": "update",
                "rename_from": null,
                "reason": null,
                "deposed": false,
            },
            [{"attribute": "tags.env", "old": "dev", "new": "prod"}]
        ])]
    );
}

#[test]
fn sensitive_values_become_stable_digest_tokens() {
    let plan = json!({
        "resource_changes": [{
            "address": "aws_db_instance.main",
            "change": {
                "actions": ["update"],
                "before": {"password": "old-secret", "engine": "postgres"},
                "after": {"password": "new-secret", "engine": "postgres"},
                "before_sensitive": {"password": true},
                "after_sensitive": {"password": true},
            }
        }]
    });

    let changes = PlanChanges::from_value(&plan, &FormatOptions::default()).unwrap();
    let attributes = changes.attributes();
    let expected_old = format!(
        "sensitive:{}",
        hex::encode(Sha256::digest(json!("old-secret").to_string().as_bytes()))
    );
    let expected_new = format!(
        "sensitive:{}",
        hex::encode(Sha256::digest(json!("new-secret").to_string().as_bytes()))
    );
    assert_eq!(
        attributes,
        vec![json!([{
            "attribute": "password",
            "old": expected_old,
            "new": expected_new,
        }])]
    );
}

#[test]
fn mixed_plan_filters_and_orders_entries() {
    let plan = json!({
        "resource_changes": [
            {
                "address": "data.aws_ami.ubuntu",
                "change": {"actions": ["read"], "before": null, "after": {"id": "ami-1"}}
            },
            {
                "address": "aws_instance.untouched",
                "change": {"actions": ["no-op"], "before": {"a": 1}, "after": {"a": 1}}
            },
            {
                "address": "aws_instance.web",
                "action_reason": "cannot_update",
                "change": {
                    "actions": ["delete", "create"],
                    "replace_paths": [["ami"]],
                    "before": {"ami": "ami-old"},
                    "after": {"ami": "ami-new"},
                }
            },
            {
                "address": "aws_s3_bucket.logs",
                "change": {"actions": ["create"], "before": null, "after": {"bucket": "logs"}}
            },
        ]
    });

    let changes = PlanChanges::from_value(&plan, &FormatOptions::default()).unwrap();
    let resources = changes.resources();
    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0]["address"], "aws_instance.web");
    assert_eq!(resources[0]["action"], "replace");
    assert_eq!(
        resources[0]["reason"],
        "delete-create cannot_update [[\"ami\"]]"
    );
    assert_eq!(resources[1]["address"], "aws_s3_bucket.logs");
    assert_eq!(resources[1]["action"], "create");

    let attributes = changes.attributes();
    assert_eq!(
        attributes[0],
        json!([{"attribute": "ami", "old": "ami-old", "new": "ami-new"}])
    );
    assert_eq!(attributes[1], Value::Null);
}

#[test]
fn flat_shape_emits_positional_rows() {
    let plan = json!({
        "resource_changes": [{
            "address": "aws_instance.x",
            "change": {
                "actions": ["update"],
                "before": {"ami": "a"},
                "after": {"ami": "b"},
            }
        }]
    });
    let options = FormatOptions {
        change_id: ChangeIdMode::Fixed("run-1".to_string()),
        full: true,
        shape: RecordShape::Flat,
    };

    let changes = PlanChanges::from_value(&plan, &options).unwrap();
    assert_eq!(
        changes.records(),
        vec![json!([
            [
                "aws_instance.x",
                "update",
                null,
                null,
                false,
                {"ami": "a"},
                {"ami": "b"},
                "run-1"
            ],
            [["ami", "a", "b", "run-1"]]
        ])]
    );
}

#[test]
fn generated_ids_differ_per_resource_but_bind_attributes() {
    let plan = json!({
        "resource_changes": [
            {
                "address": "aws_instance.a",
                "change": {"actions": ["update"], "before": {"x": 1}, "after": {"x": 2}}
            },
            {
                "address": "aws_instance.b",
                "change": {"actions": ["update"], "before": {"y": 1}, "after": {"y": 2}}
            },
        ]
    });
    let options = FormatOptions {
        change_id: ChangeIdMode::Generate,
        ..Default::default()
    };

    let changes = PlanChanges::from_value(&plan, &options).unwrap();
    let ids: Vec<String> = changes
        .changes()
        .iter()
        .map(|change| change.resource_record().change_id.clone().unwrap())
        .collect();
    assert_ne!(ids[0], ids[1]);
    for (change, id) in changes.changes().iter().zip(&ids) {
        for attribute in change.attribute_records().unwrap() {
            assert_eq!(attribute.change_id.as_deref(), Some(id.as_str()));
        }
    }
}

#[test]
fn unknown_after_apply_values_are_tagged() {
    let plan = json!({
        "resource_changes": [{
            "address": "aws_instance.x",
            "change": {
                "actions": ["update"],
                "before": {"ami": "a", "public_ip": "1.2.3.4"},
                "after": {"ami": "b", "public_ip": null},
                "after_unknown": {"public_ip": true},
            }
        }]
    });

    let changes = PlanChanges::from_value(&plan, &FormatOptions::default()).unwrap();
    assert_eq!(
        changes.attributes(),
        vec![json!([
            {"attribute": "ami", "old": "a", "new": "b"},
            {"attribute": "public_ip", "old": "1.2.3.4", "new": "(known after apply)"},
        ])]
    );
}

#[test]
fn state_snapshot_flattens_modules_in_order() {
    let state = json!({
        "values": {
            "root_module": {
                "resources": [{
                    "address": "aws_instance.web",
                    "mode": "managed",
                    "provider_name": "registry.terraform.io/hashicorp/aws",
                    "type": "aws_instance",
                    "name": "web",
                }],
                "child_modules": [{
                    "resources": [{
                        "address": "module.net.aws_subnet.main[0]",
                        "mode": "managed",
                        "provider_name": "registry.terraform.io/hashicorp/aws",
                        "type": "aws_subnet",
                        "name": "main",
                        "index": 0,
                    }]
                }]
            }
        }
    });

    let state = State::from_value(&state, &FormatOptions::default()).unwrap();
    let resources = state.resources();
    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0]["address"], "aws_instance.web");
    assert_eq!(resources[0]["index"], Value::Null);
    assert_eq!(resources[1]["address"], "module.net.aws_subnet.main[0]");
    assert_eq!(resources[1]["index"], "0");
}
