use super::recipe::Recipe;

/// Plain-text rendition of a recipe, posted as the first comment.
pub fn transcript(recipe: &Recipe) -> String {
    let mut sections = vec![recipe.title.clone()];

    if !recipe.intro.is_empty() {
        sections.push(recipe.intro.clone());
    }

    let ingredients: Vec<String> = recipe
        .ingredient_lines()
        .into_iter()
        .map(|line| format!("- {line}"))
        .collect();
    sections.push(format!("Ingredients:\n{}", ingredients.join("\n")));

    let steps = recipe.instruction_lines();
    if !steps.is_empty() {
        let numbered: Vec<String> = steps
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{}. {line}", i + 1))
            .collect();
        sections.push(format!("Instructions:\n{}", numbered.join("\n")));
    }

    if !recipe.link.is_empty() {
        sections.push(recipe.link.clone());
    }

    sections.join("\n\n")
}
