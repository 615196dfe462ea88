//! Built-in entity definitions for the production catalog.
//!
//! Field order is the order used for display and for record conversion.

use slate_model::FieldDescriptor;

/// A built-in entity: key, display label, and its field list.
pub struct BuiltinEntity {
    pub key: &'static str,
    pub label: &'static str,
    pub fields: fn() -> Vec<FieldDescriptor>,
}

pub const BUILTIN_ENTITIES: &[BuiltinEntity] = &[
    BuiltinEntity {
        key: "shot",
        label: "Shot",
        fields: shot_fields,
    },
    BuiltinEntity {
        key: "scheduleDay",
        label: "Schedule Day",
        fields: schedule_day_fields,
    },
    BuiltinEntity {
        key: "crewMember",
        label: "Crew Member",
        fields: crew_member_fields,
    },
    BuiltinEntity {
        key: "budgetItem",
        label: "Budget Item",
        fields: budget_item_fields,
    },
    BuiltinEntity {
        key: "castMember",
        label: "Cast Member",
        fields: cast_member_fields,
    },
    BuiltinEntity {
        key: "vfxShot",
        label: "VFX Shot",
        fields: vfx_shot_fields,
    },
    BuiltinEntity {
        key: "location",
        label: "Location",
        fields: location_fields,
    },
    BuiltinEntity {
        key: "prop",
        label: "Prop",
        fields: prop_fields,
    },
    BuiltinEntity {
        key: "costume",
        label: "Costume",
        fields: costume_fields,
    },
    BuiltinEntity {
        key: "equipment",
        label: "Equipment",
        fields: equipment_fields,
    },
];

fn shot_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("sceneNumber", "Scene Number")
            .required()
            .with_aliases(["scene", "sc", "scene #"]),
        FieldDescriptor::text("shotNumber", "Shot Number")
            .required()
            .with_aliases(["shot", "shot #"]),
        FieldDescriptor::text("description", "Description").with_aliases(["desc", "action"]),
        FieldDescriptor::enumeration(
            "shotType",
            "Shot Type",
            [
                "Wide",
                "Medium",
                "Close-Up",
                "Extreme Close-Up",
                "Insert",
                "Over the Shoulder",
                "POV",
                "Two Shot",
            ],
        )
        .with_default("Medium")
        .with_aliases(["shot size", "framing", "size"]),
        FieldDescriptor::enumeration(
            "cameraMovement",
            "Camera Movement",
            [
                "Static", "Pan", "Tilt", "Dolly", "Tracking", "Handheld", "Crane", "Steadicam",
                "Zoom",
            ],
        )
        .with_default("Static")
        .with_aliases(["movement", "move"]),
        FieldDescriptor::text("cameraOperator", "Camera Operator").with_aliases([
            "DOP",
            "DP",
            "cinematographer",
            "camera op",
        ]),
        FieldDescriptor::text("lens", "Lens").with_aliases(["focal length", "lens mm"]),
        FieldDescriptor::number("estimatedDuration", "Estimated Duration")
            .with_aliases(["duration", "est time", "minutes"]),
        FieldDescriptor::boolean("completed", "Completed")
            .with_default(false)
            .with_aliases(["done", "shot?"]),
        FieldDescriptor::text("notes", "Notes").with_aliases(["comments"]),
    ]
}

fn schedule_day_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::number("dayNumber", "Day Number")
            .required()
            .with_aliases(["day", "shoot day", "day #"]),
        FieldDescriptor::date("date", "Date")
            .required()
            .with_aliases(["shoot date"]),
        FieldDescriptor::text("location", "Location").with_aliases(["set", "where"]),
        FieldDescriptor::text("callTime", "Call Time").with_aliases(["call", "crew call"]),
        FieldDescriptor::text("wrapTime", "Wrap Time").with_aliases(["wrap"]),
        FieldDescriptor::number_list("scenes", "Scenes").with_aliases(["scene numbers"]),
        FieldDescriptor::text_list("castRequired", "Cast Required").with_aliases(["cast"]),
        FieldDescriptor::enumeration("dayType", "Day Type", ["Shoot", "Travel", "Rehearsal", "Off"])
            .with_default("Shoot"),
        FieldDescriptor::text("notes", "Notes"),
    ]
}

fn crew_member_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("name", "Name")
            .required()
            .with_aliases(["full name", "crew name"]),
        FieldDescriptor::enumeration(
            "department",
            "Department",
            [
                "Camera",
                "Grip",
                "Electric",
                "Sound",
                "Art",
                "Wardrobe",
                "Makeup",
                "Production",
                "Locations",
                "Post",
                "VFX",
                "Other",
            ],
        )
        .with_default("Other")
        .with_aliases(["dept"]),
        FieldDescriptor::text("role", "Role")
            .required()
            .with_aliases(["position", "job title", "title"]),
        FieldDescriptor::text("email", "Email Address").with_aliases(["email", "e-mail"]),
        FieldDescriptor::text("phone", "Phone Number").with_aliases(["phone", "mobile", "cell"]),
        FieldDescriptor::number("dayRate", "Day Rate").with_aliases(["rate"]),
        FieldDescriptor::date("startDate", "Start Date").with_aliases(["start"]),
        FieldDescriptor::boolean("available", "Available")
            .with_default(true)
            .with_aliases(["availability"]),
    ]
}

fn budget_item_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::enumeration(
            "category",
            "Category",
            ["Above the Line", "Production", "Post-Production", "Other"],
        )
        .required()
        .with_default("Production")
        .with_aliases(["account", "section"]),
        FieldDescriptor::text("description", "Description")
            .required()
            .with_aliases(["item", "line item"]),
        FieldDescriptor::number("estimatedCost", "Estimated Cost")
            .required()
            .with_aliases(["estimate", "budget", "est cost"]),
        FieldDescriptor::number("actualCost", "Actual Cost").with_aliases(["actual", "spent"]),
        FieldDescriptor::text("vendor", "Vendor").with_aliases(["supplier", "payee"]),
        FieldDescriptor::boolean("paid", "Paid").with_default(false),
        FieldDescriptor::text("notes", "Notes"),
    ]
}

fn cast_member_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("actorName", "Actor Name")
            .required()
            .with_aliases(["actor", "performer", "talent"]),
        FieldDescriptor::text("characterName", "Character Name")
            .required()
            .with_aliases(["character", "role"]),
        FieldDescriptor::text("characterDescription", "Character Description")
            .with_aliases(["breakdown"]),
        FieldDescriptor::text("email", "Email Address").with_aliases(["email", "e-mail"]),
        FieldDescriptor::text("phone", "Phone Number").with_aliases(["phone", "mobile"]),
        FieldDescriptor::text("agent", "Agent").with_aliases(["representation", "agency"]),
        FieldDescriptor::number_list("scenes", "Scenes").with_aliases(["scene numbers"]),
        FieldDescriptor::enumeration(
            "status",
            "Status",
            ["Pending", "Offered", "Confirmed", "Declined"],
        )
        .with_default("Pending"),
    ]
}

fn vfx_shot_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("shotCode", "Shot Code")
            .required()
            .with_aliases(["shot", "shot id", "vfx id"]),
        FieldDescriptor::text("sceneNumber", "Scene Number").with_aliases(["scene", "sc"]),
        FieldDescriptor::text("description", "Description").with_aliases(["desc"]),
        FieldDescriptor::enumeration(
            "vfxShotStatus",
            "Status",
            ["Not Started", "In Progress", "Review", "Approved", "Final"],
        )
        .with_default("Not Started"),
        FieldDescriptor::text("vendor", "Vendor").with_aliases(["facility", "house"]),
        FieldDescriptor::enumeration("complexity", "Complexity", ["Low", "Medium", "High"])
            .with_default("Medium")
            .with_aliases(["difficulty"]),
        FieldDescriptor::number("bidAmount", "Bid Amount").with_aliases(["bid", "cost"]),
        FieldDescriptor::number("frameCount", "Frame Count").with_aliases(["frames", "length"]),
        FieldDescriptor::date("dueDate", "Due Date").with_aliases(["due", "deadline"]),
        FieldDescriptor::text_list("elements", "Elements").with_aliases(["plates"]),
    ]
}

fn location_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("name", "Name")
            .required()
            .with_aliases(["location", "location name"]),
        FieldDescriptor::text("address", "Address").with_aliases(["addr"]),
        FieldDescriptor::text("contactName", "Contact Name").with_aliases(["contact"]),
        FieldDescriptor::text("contactPhone", "Contact Phone"),
        FieldDescriptor::boolean("permitRequired", "Permit Required")
            .with_default(false)
            .with_aliases(["permit?"]),
        FieldDescriptor::enumeration(
            "permitStatus",
            "Permit Status",
            ["Not Needed", "Pending", "Approved", "Denied"],
        )
        .with_default("Pending"),
        FieldDescriptor::text("parking", "Parking"),
        FieldDescriptor::number_list("scenes", "Scenes").with_aliases(["scene numbers"]),
        FieldDescriptor::text("notes", "Notes"),
    ]
}

fn prop_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("name", "Name")
            .required()
            .with_aliases(["prop", "item"]),
        FieldDescriptor::number_list("scenes", "Scenes").with_aliases(["scene numbers"]),
        FieldDescriptor::text("character", "Character").with_aliases(["used by"]),
        FieldDescriptor::enumeration("source", "Source", ["Buy", "Rent", "Build", "Borrow", "Owned"])
            .with_default("Buy"),
        FieldDescriptor::number("cost", "Cost").with_aliases(["price"]),
        FieldDescriptor::boolean("acquired", "Acquired")
            .with_default(false)
            .with_aliases(["have it"]),
        FieldDescriptor::text("notes", "Notes"),
    ]
}

fn costume_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("character", "Character").required(),
        FieldDescriptor::text("description", "Description")
            .required()
            .with_aliases(["look", "outfit"]),
        FieldDescriptor::text("size", "Size").with_aliases(["sizes"]),
        FieldDescriptor::number_list("scenes", "Scenes").with_aliases(["scene numbers"]),
        FieldDescriptor::number("changeNumber", "Change Number").with_aliases(["change", "change #"]),
        FieldDescriptor::enumeration("status", "Status", ["Needed", "Sourced", "Fitted", "Ready"])
            .with_default("Needed"),
        FieldDescriptor::text("notes", "Notes"),
    ]
}

fn equipment_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("name", "Name")
            .required()
            .with_aliases(["item", "equipment"]),
        FieldDescriptor::enumeration(
            "category",
            "Category",
            ["Camera", "Lens", "Lighting", "Grip", "Sound", "Power", "Other"],
        )
        .with_default("Other")
        .with_aliases(["type"]),
        FieldDescriptor::number("quantity", "Quantity")
            .with_default(1.0)
            .with_aliases(["qty", "count"]),
        FieldDescriptor::text("vendor", "Vendor").with_aliases(["rental house", "supplier"]),
        FieldDescriptor::number("dailyRate", "Daily Rate").with_aliases(["rate", "day rate"]),
        FieldDescriptor::date("pickupDate", "Pickup Date").with_aliases(["pickup"]),
        FieldDescriptor::date("returnDate", "Return Date").with_aliases(["return"]),
        FieldDescriptor::text_list("serialNumbers", "Serial Numbers")
            .with_aliases(["serial", "serial #", "serials"]),
        FieldDescriptor::boolean("insured", "Insured").with_default(false),
    ]
}
