// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Azure region display names to region codes.

/// Every display name the lookup knows, paired with its region code.
pub const REGIONS: [(&str, &str); 25] = [
    ("East US 2", "eastus2"),
    ("West US 2", "westus2"),
    ("South Central US", "southcentralus"),
    ("West Central US", "westcentralus"),
    ("East US", "eastus"),
    ("North Central US", "northcentralus"),
    ("North Europe", "northeurope"),
    ("Canada East", "canadaeast"),
    ("Central US", "centralus"),
    ("West US", "westus"),
    ("West Europe", "westeurope"),
    ("Central India", "centralindia"),
    ("Southeast Asia", "southeastasia"),
    ("Canada Central", "canadacentral"),
    ("Korea Central", "koreacentral"),
    ("France Central", "francecentral"),
    ("South India", "southindia"),
    ("Australia East", "australiaeast"),
    ("Australia Southeast", "australiasoutheast"),
    ("Japan West", "japanwest"),
    ("UK West", "ukwest"),
    ("UK South", "uksouth"),
    ("Japan East", "japaneast"),
    ("East Asia", "eastasia"),
    ("Brazil South", "brazilsouth"),
];

/// Looks up the region code for a display name such as `"West Europe"`.
///
/// Matching is exact. Unknown, empty or missing names return `None`.
pub fn region_code(display_name: Option<&str>) -> Option<&'static str> {
    let display_name = display_name?;
    REGIONS
        .iter()
        .find(|(name, _)| *name == display_name)
        .map(|(_, code)| *code)
}
