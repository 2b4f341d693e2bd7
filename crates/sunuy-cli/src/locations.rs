use sunuy_core::LocationIndex;

/// Print regions, the departments of `region`, or the communes of
/// `department` within `region`.
///
/// # Errors
///
/// Returns an error if the region or department is unknown.
pub(crate) fn run_locations(
    index: &LocationIndex,
    region: Option<&str>,
    department: Option<&str>,
) -> anyhow::Result<()> {
    for line in location_lines(index, region, department)? {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn location_lines(
    index: &LocationIndex,
    region: Option<&str>,
    department: Option<&str>,
) -> anyhow::Result<Vec<String>> {
    let Some(region) = region else {
        return Ok(index.region_names().map(str::to_owned).collect());
    };
    let node = index
        .region(region)
        .ok_or_else(|| anyhow::anyhow!("unknown region '{region}'; run `locations` to list regions"))?;

    let Some(department) = department else {
        return Ok(node.departments.iter().map(|d| d.name.clone()).collect());
    };
    let department_node = node
        .departments
        .iter()
        .find(|d| d.name == department)
        .ok_or_else(|| anyhow::anyhow!("unknown department '{department}' in region '{region}'"))?;

    Ok(department_node.communes.clone())
}
